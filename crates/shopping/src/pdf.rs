//! Shopping list export. Text uses the standard Helvetica font with
//! WinAnsiEncoding, so characters outside Latin-1 are printed as `?`.

use anyhow::Result;
use lopdf::{
    Document, Object, ObjectId, Stream,
    content::{Content, Operation},
    dictionary,
};

use crate::ShoppingItem;

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 42;
const LINE_HEIGHT: i64 = 28;
const TITLE_SIZE: i64 = 25;
const TEXT_SIZE: i64 = 14;

pub const TITLE: &str = "Shopping list";

/// `1. flour (g) - 150`
pub fn format_line(index: usize, item: &ShoppingItem) -> String {
    format!(
        "{}. {} ({}) - {}",
        index + 1,
        item.name,
        item.measurement_unit,
        item.amount
    )
}

fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

fn lines_per_page(first: bool) -> usize {
    let title = if first { 2 * LINE_HEIGHT } else { 0 };
    let usable = PAGE_HEIGHT - 2 * MARGIN - TITLE_SIZE - title;
    (usable / LINE_HEIGHT) as usize
}

fn text(x: i64, y: i64, font: &str, size: i64, value: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), size.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(encode(value))]),
        Operation::new("ET", vec![]),
    ]
}

fn rgb(r: f32, g: f32, b: f32) -> Operation {
    Operation::new("rg", vec![r.into(), g.into(), b.into()])
}

/// Renders the items as an A4 document, starting a new page when the
/// current one is full.
pub fn render(items: &[ShoppingItem]) -> Result<Vec<u8>> {
    let lines = items
        .iter()
        .enumerate()
        .map(|(i, item)| format_line(i, item))
        .collect::<Vec<_>>();

    let mut chunks = Vec::new();
    let mut rest = lines.as_slice();
    loop {
        let take = lines_per_page(chunks.is_empty()).min(rest.len());
        let (chunk, tail) = rest.split_at(take);
        chunks.push(chunk);
        rest = tail;
        if rest.is_empty() {
            break;
        }
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids: Vec<ObjectId> = Vec::with_capacity(chunks.len());
    for (page, chunk) in chunks.into_iter().enumerate() {
        let mut operations = Vec::new();
        let mut y = PAGE_HEIGHT - MARGIN - TITLE_SIZE;

        if page == 0 {
            // roughly centred, Helvetica-Bold averages 0.6em per glyph
            let width = (TITLE.len() as f32 * TITLE_SIZE as f32 * 0.6) as i64;
            operations.push(rgb(0.0, 0.71, 0.525));
            operations.extend(text((PAGE_WIDTH - width) / 2, y, "F2", TITLE_SIZE, TITLE));
            y -= LINE_HEIGHT + LINE_HEIGHT / 2;
        }

        operations.push(rgb(0.0, 0.176, 0.56));
        for line in chunk {
            operations.extend(text(MARGIN, y, "F1", TEXT_SIZE, line));
            y -= LINE_HEIGHT;
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        kids.push(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        }));
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Count" => kids.len() as i64,
        "Kids" => kids.into_iter().map(Object::from).collect::<Vec<_>>(),
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf)?;

    Ok(buf)
}
