//! Shared single-or-collection retrieval used by every resource command.
//!
//! An empty target list switches to collection mode: the whole collection is
//! fetched with one call. Otherwise each target is resolved to a reference and
//! fetched on its own, in input order, and the first failure aborts the batch
//! before anything is printed.

use std::io::Write;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use storctl_api::Reference;
use unicode_width::UnicodeWidthStr;

use crate::error::Result;
use crate::format::{render, Template};
use crate::reference::{parse_reference, DEFAULT_NAMESPACE};

/// One resource kind as seen by the dispatcher.
#[async_trait]
pub trait InspectSource: Send + Sync {
    /// Whether references of this kind carry a namespace.
    fn scoped(&self) -> bool;

    /// Fetches one object.
    async fn fetch_one(&self, reference: &Reference) -> Result<Value>;

    /// Fetches the whole collection with a single call.
    async fn fetch_all(&self) -> Result<Vec<Value>>;

    /// Table layout for `ls`: header and field path per column.
    fn columns(&self) -> &'static [(&'static str, &'static str)] {
        &[("NAME", "name")]
    }

    /// How an item is addressed on the command line, for `ls --quiet`.
    fn display_ref(&self, item: &Value) -> String {
        let field = |key: &str| item.get(key).and_then(Value::as_str).unwrap_or_default();
        if self.scoped() {
            format!("{}/{}", field("namespace"), field("name"))
        } else {
            field("name").to_string()
        }
    }
}

/// Converts typed API results into the uniform shape rendered by dispatch.
pub fn to_values<T: Serialize>(items: Vec<T>) -> Result<Vec<Value>> {
    items
        .into_iter()
        .map(|item| serde_json::to_value(item).map_err(Into::into))
        .collect()
}

/// Fetches the targets, or the whole collection when there are none.
pub async fn collect<S: InspectSource + ?Sized>(source: &S, targets: &[String]) -> Result<Vec<Value>> {
    if targets.is_empty() {
        return source.fetch_all().await;
    }

    let mut items = Vec::with_capacity(targets.len());
    for target in targets {
        let reference = parse_reference(target, source.scoped(), DEFAULT_NAMESPACE)?;
        items.push(source.fetch_one(&reference).await?);
    }
    Ok(items)
}

/// `inspect`: fetch and render with the requested format.
pub async fn inspect<S: InspectSource + ?Sized>(
    source: &S,
    targets: &[String],
    format: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let items = collect(source, targets).await?;
    render(out, &items, format)
}

/// `ls`: fetch the collection and print a table, bare references, or one
/// templated line per item.
pub async fn list<S: InspectSource + ?Sized>(
    source: &S,
    quiet: bool,
    format: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    let items = source.fetch_all().await?;

    if quiet {
        for item in &items {
            writeln!(out, "{}", source.display_ref(item))?;
        }
        return Ok(());
    }
    if let Some(format) = format {
        return render(out, &items, format);
    }

    let columns = source.columns();
    let cells: Vec<Template> = columns
        .iter()
        .map(|(_, path)| Template::parse(&format!("{{{{.{path}}}}}")))
        .collect::<Result<_>>()?;

    let mut rows = vec![columns.iter().map(|(h, _)| h.to_string()).collect::<Vec<_>>()];
    for item in &items {
        rows.push(
            cells
                .iter()
                .map(|cell| cell.execute(item))
                .collect::<Result<Vec<_>>>()?,
        );
    }

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| rows.iter().map(|row| row[i].width()).max().unwrap_or(0))
        .collect();
    for row in rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell}{}", " ".repeat(width - cell.width())))
            .collect::<Vec<_>>()
            .join("   ");
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}
