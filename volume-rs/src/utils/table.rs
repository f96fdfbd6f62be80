//! Table formatting utilities

use prettytable::{Cell, Row, Table};
use vol_3b::ChunkRecord;

use super::format::format_offset;

/// Create a table with bold headers
pub fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*prettytable::format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).style_spec("b"))
        .collect();
    table.set_titles(Row::new(header_cells));

    table
}

/// Build the chunk listing shared by `info` and `chunks`
pub fn chunk_table(chunks: &[ChunkRecord]) -> Table {
    let mut table = create_table(&["#", "Tag", "Offset", "Size", "Description"]);

    for (index, chunk) in chunks.iter().enumerate() {
        table.add_row(Row::new(vec![
            Cell::new(&index.to_string()),
            Cell::new(&chunk.tag.to_string()).style_spec("Fc"),
            Cell::new(&format_offset(chunk.offset)),
            Cell::new(&chunk.declared_size.to_string()).style_spec("r"),
            Cell::new(chunk.tag.description()),
        ]));
    }

    table
}
