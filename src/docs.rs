use crate::field::{FieldKind, Shape};
use std::{fs, path::Path};

/// Renders a markdown summary of every variable a record shape reads
///
/// Nested records are flattened into the same table.
///
/// # Example
/// ```rust
/// use envbind::{EnvRecord, Record, docs::render_markdown};
///
/// #[derive(EnvRecord)]
/// struct Config {
///     /// Server port
///     #[field(env = "PORT")]
///     port: u16,
/// }
///
/// let md = render_markdown(Config::describe());
/// assert!(md.contains("| PORT | u16 | No | Server port |"));
/// ```
pub fn render_markdown(shape: &Shape) -> String {
    let mut md = String::new();

    md.push_str("## Environment Variables Summary\n\n");
    md.push_str("| Variable | Type | Required | Description |\n");
    md.push_str("|----------|------|----------|-------------|\n");
    push_rows(&mut md, shape);

    md
}

fn push_rows(md: &mut String, shape: &Shape) {
    for field in &shape.fields {
        if let FieldKind::Record(nested) = field.kind.unwrap_optional() {
            push_rows(md, nested);
            continue;
        }

        let Some(key) = field.env else {
            continue;
        };
        // Malformed annotations are shown as written
        let required = match field.is_required() {
            Ok(true) => "Yes",
            Ok(false) => "No",
            Err(_) => field.required.unwrap_or("-"),
        };
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            key,
            field.kind,
            required,
            field.doc.unwrap_or("-")
        ));
    }
}

/// Write the markdown summary of a record shape to a file
///
/// # Example
/// ```no_run
/// use envbind::{EnvRecord, Record, docs::write_docs};
///
/// #[derive(EnvRecord)]
/// struct Config {
///     #[field(env = "PORT", doc = "Server port")]
///     port: u16,
/// }
///
/// write_docs(Config::describe(), "CONFIG.md").unwrap();
/// ```
pub fn write_docs(shape: &Shape, path: impl AsRef<Path>) -> std::io::Result<()> {
    fs::write(path, render_markdown(shape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EnvRecord, Record};

    #[derive(EnvRecord)]
    struct Database {
        #[field(env = "DB_URL", required, doc = "Connection string")]
        url: String,
        #[field(env = "DB_POOL")]
        pool: Option<u32>,
    }

    #[derive(EnvRecord)]
    struct App {
        /// Listen port
        #[field(env = "PORT")]
        port: u16,
        #[field(nested)]
        database: Database,
        #[field(env = "TAGS", required = "sometimes")]
        tags: Vec<String>,
    }

    #[test]
    fn test_render_header() {
        let md = render_markdown(App::describe());
        assert!(md.starts_with("## Environment Variables Summary\n\n"));
        assert!(md.contains("| Variable | Type | Required | Description |"));
    }

    #[test]
    fn test_render_flattens_nested_records() {
        let md = render_markdown(App::describe());
        let rows: Vec<&str> = md.lines().skip(4).collect();

        assert_eq!(
            rows,
            vec![
                "| PORT | u16 | No | Listen port |",
                "| DB_URL | String | Yes | Connection string |",
                "| DB_POOL | Option<u32> | No | - |",
                "| TAGS | Vec<String> | sometimes | - |",
            ]
        );
    }

    #[test]
    fn test_write_docs() {
        let path = std::env::temp_dir().join(format!("envbind-docs-{}.md", std::process::id()));
        write_docs(App::describe(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_markdown(App::describe()));
        fs::remove_file(&path).ok();
    }
}
