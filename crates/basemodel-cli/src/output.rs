use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a single value as JSON.
pub fn render<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

/// Render a list: one JSON array, or one compact line per item for `raw`.
pub fn render_items<T: Serialize>(
    items: &[T],
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => render(&items, pretty),
        OutputFormat::Raw => to_ndjson(items),
    }
}

pub fn output<T: Serialize>(value: &T, format: OutputFormat, pretty: bool) -> anyhow::Result<()> {
    let rendered = match format {
        OutputFormat::Json => render(value, pretty)?,
        OutputFormat::Raw => render(value, false)?,
    };
    println!("{rendered}");
    Ok(())
}

pub fn output_items<T: Serialize>(
    items: &[T],
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<()> {
    let rendered = render_items(items, format, pretty)?;
    println!("{}", rendered.trim_end());
    Ok(())
}

fn to_ndjson<T: Serialize>(items: &[T]) -> anyhow::Result<String> {
    let mut out = String::new();
    for item in items {
        out.push_str(&serde_json::to_string(item)?);
        out.push('\n');
    }
    Ok(out)
}
