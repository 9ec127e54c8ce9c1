//! Output rendering for inspected resources.
//!
//! * empty format: one pretty-printed JSON array with every result
//! * `json`: one compact JSON document per line
//! * anything else: a template, one line per result, where `{{.Field}}`,
//!   `{{.a.b}}`, `{{.}}` and `{{json .Field}}` are substituted

use std::io::Write;

use serde_json::Value;

use crate::error::{CliError, Result};

/// Placeholder printed for fields that do not exist.
pub const NO_VALUE: &str = "<no value>";

/// Writes `items` in the requested format.
///
/// An empty format prints one pretty JSON array, `json` prints one compact
/// object per line, and anything else is parsed as a [`Template`] and
/// executed once per item.
pub fn render(out: &mut dyn Write, items: &[Value], format: &str) -> Result<()> {
    match format.trim() {
        "" => {
            writeln!(out, "{}", serde_json::to_string_pretty(items)?)?;
        }
        "json" => {
            for item in items {
                writeln!(out, "{}", serde_json::to_string(item)?)?;
            }
        }
        _ => {
            let template = Template::parse(format)?;
            for item in items {
                writeln!(out, "{}", template.execute(item)?)?;
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Text(String),
    Field(Vec<String>),
    Json(Vec<String>),
}

/// A parsed format string.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pieces: Vec<Piece>,
}

impl Template {
    /// Splits `source` into literal text and `{{...}}` actions.
    pub fn parse(source: &str) -> Result<Self> {
        let mut pieces = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                pieces.push(Piece::Text(unescape(&rest[..start])));
            }
            let after = &rest[start + 2..];
            let end = after
                .find("}}")
                .ok_or_else(|| CliError::Template(format!("unclosed action in {source:?}")))?;
            pieces.push(parse_action(after[..end].trim())?);
            rest = &after[end + 2..];
        }
        if !rest.is_empty() {
            pieces.push(Piece::Text(unescape(rest)));
        }

        Ok(Self { pieces })
    }

    /// Renders one item. Missing fields print [`NO_VALUE`].
    pub fn execute(&self, item: &Value) -> Result<String> {
        let mut line = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => line.push_str(text),
                Piece::Field(path) => match lookup(item, path) {
                    Some(value) => line.push_str(&display(value)?),
                    None => line.push_str(NO_VALUE),
                },
                Piece::Json(path) => {
                    let value = lookup(item, path).unwrap_or(&Value::Null);
                    line.push_str(&serde_json::to_string(value)?);
                }
            }
        }
        Ok(line)
    }
}

fn parse_action(action: &str) -> Result<Piece> {
    let (is_json, path) = match action.strip_prefix("json") {
        Some(rest) if rest.starts_with(char::is_whitespace) => (true, rest.trim()),
        _ => (false, action),
    };

    let path = path
        .strip_prefix('.')
        .ok_or_else(|| CliError::Template(format!("unsupported action {{{{{action}}}}}")))?;
    let segments: Vec<String> = if path.is_empty() {
        Vec::new()
    } else {
        path.split('.').map(str::to_string).collect()
    };
    if segments.iter().any(|s| s.is_empty() || s.contains(char::is_whitespace)) {
        return Err(CliError::Template(format!("invalid field path {{{{{action}}}}}")));
    }

    Ok(if is_json {
        Piece::Json(segments)
    } else {
        Piece::Field(segments)
    })
}

fn unescape(text: &str) -> String {
    text.replace("\\n", "\n").replace("\\t", "\t")
}

/// Field lookup tolerant of `Name` vs `name` style keys.
fn lookup<'a>(item: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter().try_fold(item, |current, segment| {
        let object = current.as_object()?;
        object.get(segment.as_str()).or_else(|| {
            object
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(segment))
                .map(|(_, value)| value)
        })
    })
}

fn display(value: &Value) -> Result<String> {
    Ok(match value {
        Value::Null => NO_VALUE.to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render_to_string(items: &[Value], format: &str) -> String {
        let mut out = Vec::new();
        render(&mut out, items, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_default_format_is_pretty_array() {
        let items = vec![json!({"name": "a"}), json!({"name": "b"})];
        let out = render_to_string(&items, "");
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, json!([{"name": "a"}, {"name": "b"}]));
        assert!(out.contains('\n'));
    }

    #[test]
    fn test_json_format_is_one_line_per_item() {
        let items = vec![json!({"name": "a"}), json!({"name": "b"})];
        assert_eq!(
            render_to_string(&items, "json"),
            "{\"name\":\"a\"}\n{\"name\":\"b\"}\n"
        );
    }

    #[test]
    fn test_template_fields() {
        let items = vec![json!({"name": "vol1", "namespace": "default", "size": 5})];
        assert_eq!(
            render_to_string(&items, "{{.Namespace}}/{{.Name}} {{.size}}GiB"),
            "default/vol1 5GiB\n"
        );
    }

    #[test]
    fn test_template_nested_and_missing() {
        let item = json!({"capacityStats": {"totalCapacityBytes": 100}});
        let t = Template::parse("{{.capacityStats.totalCapacityBytes}} {{.nope}}").unwrap();
        assert_eq!(t.execute(&item).unwrap(), format!("100 {NO_VALUE}"));
    }

    #[test]
    fn test_template_json_action() {
        let item = json!({"labels": {"tier": "gold"}});
        let t = Template::parse("{{json .labels}}").unwrap();
        assert_eq!(t.execute(&item).unwrap(), "{\"tier\":\"gold\"}");
        let t = Template::parse("{{json .}}").unwrap();
        assert_eq!(t.execute(&item).unwrap(), "{\"labels\":{\"tier\":\"gold\"}}");
    }

    #[test]
    fn test_template_escapes() {
        let t = Template::parse("{{.a}}\\t{{.b}}").unwrap();
        assert_eq!(t.execute(&json!({"a": 1, "b": 2})).unwrap(), "1\t2");
    }

    #[test]
    fn test_template_errors() {
        assert!(matches!(Template::parse("{{.name"), Err(CliError::Template(_))));
        assert!(matches!(Template::parse("{{range .x}}"), Err(CliError::Template(_))));
        assert!(matches!(Template::parse("{{.a..b}}"), Err(CliError::Template(_))));
    }

    #[test]
    fn test_empty_collection_renders_empty_array() {
        assert_eq!(render_to_string(&[], ""), "[]\n");
        assert_eq!(render_to_string(&[], "{{.name}}"), "");
    }
}
