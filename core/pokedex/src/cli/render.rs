//! 標準出力への表示（表 / JSON）
//!
//! Writer を受け取るのでテストでは Vec<u8> に書き出して確認する。

use crate::domain::Page;
use common::domain::EntityRecord;
use common::error::Error;
use std::io::Write;

const NAME_WIDTH: usize = 16;
const TYPES_WIDTH: usize = 20;

fn write_err(e: std::io::Error) -> Error {
    Error::io_msg(format!("Failed to write output: {}", e))
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// 一覧 1 ページ分を表で出す
pub fn render_page_table(out: &mut dyn Write, page: &Page<EntityRecord>) -> Result<(), Error> {
    writeln!(
        out,
        "{:>5}  {:<nw$}  {:<tw$}  Image",
        "#",
        "Name",
        "Types",
        nw = NAME_WIDTH,
        tw = TYPES_WIDTH
    )
    .map_err(write_err)?;
    for rec in &page.items {
        writeln!(
            out,
            "{:>5}  {:<nw$}  {:<tw$}  {}",
            rec.id,
            rec.name,
            rec.types.join(", "),
            or_dash(rec.image_url.as_deref()),
            nw = NAME_WIDTH,
            tw = TYPES_WIDTH
        )
        .map_err(write_err)?;
        if let Some(abilities) = &rec.abilities {
            writeln!(out, "       abilities: {}", abilities.join(", ")).map_err(write_err)?;
        }
        if let Some(evolutions) = &rec.evolutions {
            writeln!(out, "       evolutions: {}", evolutions.join(" -> ")).map_err(write_err)?;
        }
    }
    writeln!(
        out,
        "page {}/{} ({} matches)",
        page.page,
        page.page_count.max(1),
        page.total
    )
    .map_err(write_err)?;
    Ok(())
}

/// 一覧 1 ページ分を JSON で出す
pub fn render_page_json(out: &mut dyn Write, page: &Page<EntityRecord>) -> Result<(), Error> {
    let value = serde_json::json!({
        "page": page.page,
        "page_count": page.page_count,
        "total": page.total,
        "items": page.items,
    });
    let s = serde_json::to_string_pretty(&value)?;
    writeln!(out, "{}", s).map_err(write_err)
}

/// 1 件の詳細
pub fn render_record(out: &mut dyn Write, rec: &EntityRecord) -> Result<(), Error> {
    writeln!(out, "#{} {}", rec.id, rec.name).map_err(write_err)?;
    writeln!(out, "  image:     {}", or_dash(rec.image_url.as_deref())).map_err(write_err)?;
    writeln!(out, "  types:     {}", rec.types.join(", ")).map_err(write_err)?;
    if let Some(h) = rec.height {
        writeln!(out, "  height:    {:.1} m", f64::from(h) / 10.0).map_err(write_err)?;
    }
    if let Some(w) = rec.weight {
        writeln!(out, "  weight:    {:.1} kg", f64::from(w) / 10.0).map_err(write_err)?;
    }
    if let Some(abilities) = &rec.abilities {
        writeln!(out, "  abilities: {}", abilities.join(", ")).map_err(write_err)?;
    }
    if let Some(evolutions) = &rec.evolutions {
        writeln!(out, "  evolution: {}", evolutions.join(" -> ")).map_err(write_err)?;
    }
    Ok(())
}

pub fn render_record_json(out: &mut dyn Write, rec: &EntityRecord) -> Result<(), Error> {
    let s = serde_json::to_string_pretty(rec)?;
    writeln!(out, "{}", s).map_err(write_err)
}

/// 進化チェーンを 1 行 1 種族で出す
pub fn render_names(out: &mut dyn Write, names: &[String]) -> Result<(), Error> {
    for name in names {
        writeln!(out, "{}", name).map_err(write_err)?;
    }
    Ok(())
}
