use std::io::Read;

use csv::{ByteRecord, ReaderBuilder};

use crate::{
    error::AppResult,
    models::{
        catalogue_item::{normalize_text, parse_date_added},
        CatalogueItem, ContentType,
    },
};

/// Column positions of the known catalogue fields in a CSV header
#[derive(Debug, Default)]
struct Columns {
    show_id: Option<usize>,
    content_type: Option<usize>,
    title: Option<usize>,
    director: Option<usize>,
    cast: Option<usize>,
    country: Option<usize>,
    date_added: Option<usize>,
    release_year: Option<usize>,
    rating: Option<usize>,
    duration: Option<usize>,
    listed_in: Option<usize>,
    description: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &ByteRecord) -> Self {
        let mut columns = Columns::default();
        for (pos, raw) in headers.iter().enumerate() {
            let name = String::from_utf8_lossy(raw).trim().to_lowercase();
            let slot = match name.as_str() {
                "show_id" => &mut columns.show_id,
                "type" | "content_type" => &mut columns.content_type,
                "title" => &mut columns.title,
                "director" => &mut columns.director,
                "cast" => &mut columns.cast,
                "country" => &mut columns.country,
                "date_added" => &mut columns.date_added,
                "release_year" => &mut columns.release_year,
                "rating" => &mut columns.rating,
                "duration" => &mut columns.duration,
                "listed_in" => &mut columns.listed_in,
                "description" => &mut columns.description,
                _ => continue,
            };
            slot.get_or_insert(pos);
        }
        columns
    }
}

fn field(record: &ByteRecord, column: Option<usize>) -> Option<String> {
    let raw = column.and_then(|pos| record.get(pos))?;
    let text = String::from_utf8_lossy(raw);
    normalize_text(Some(text.as_ref()))
}

fn item_from_record(record: &ByteRecord, columns: &Columns) -> CatalogueItem {
    CatalogueItem {
        show_id: field(record, columns.show_id),
        content_type: field(record, columns.content_type).and_then(|t| ContentType::parse(&t)),
        title: field(record, columns.title).unwrap_or_default(),
        director: field(record, columns.director),
        cast: field(record, columns.cast),
        country: field(record, columns.country),
        date_added: field(record, columns.date_added).and_then(|d| parse_date_added(&d)),
        release_year: field(record, columns.release_year).and_then(|y| y.parse().ok()),
        rating: field(record, columns.rating),
        duration: field(record, columns.duration),
        listed_in: field(record, columns.listed_in),
        description: field(record, columns.description),
    }
}

/// Parses a headed catalogue CSV
///
/// Malformed values never fail the load: short rows, blank cells, invalid
/// UTF-8 and unparsable years or dates all normalize to missing fields.
pub fn parse_catalogue_csv<R: Read>(reader: R) -> AppResult<Vec<CatalogueItem>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = Columns::from_headers(reader.byte_headers()?);

    if columns.title.is_none() {
        tracing::warn!("Catalogue CSV has no title column; every title will be empty");
    }

    let mut items = Vec::new();
    let mut record = ByteRecord::new();
    while reader.read_byte_record(&mut record)? {
        items.push(item_from_record(&record, &columns));
    }

    tracing::debug!(rows = items.len(), "Catalogue CSV parsed");
    Ok(items)
}
