//! Word-processor output. Packages content blocks as a minimal OOXML
//! (`.docx`) archive: content types, relationships, document, styles,
//! numbering and document properties.

use crate::content::ContentBlock;
use crate::output::paths::output_path;
use crate::output::{ensure_parent, OutputError, OutputResult};
use chrono::{SecondsFormat, Utc};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES_XML: &[u8] = b"<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\n  <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\n  <Default Extension=\"xml\" ContentType=\"application/xml\"/>\n  <Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\n  <Override PartName=\"/word/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml\"/>\n  <Override PartName=\"/word/numbering.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml\"/>\n  <Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>\n  <Override PartName=\"/docProps/app.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.extended-properties+xml\"/>\n</Types>";

const ROOT_RELS_XML: &[u8] = b"<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\n  <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>\n  <Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties\" Target=\"docProps/core.xml\"/>\n  <Relationship Id=\"rId3\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties\" Target=\"docProps/app.xml\"/>\n</Relationships>";

const DOCUMENT_RELS_XML: &[u8] = b"<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\n  <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>\n  <Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering\" Target=\"numbering.xml\"/>\n</Relationships>";

const APP_XML: &[u8] = b"<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\">\n  <Application>site-scribe</Application>\n</Properties>";

/// Numbering instance for bulleted list items
const BULLET_NUM_ID: u32 = 1;
/// Numbering instance for ordered list items, shared by every `ol` on the page
const DECIMAL_NUM_ID: u32 = 2;

/// Spacing after a paragraph, in twentieths of a point
const BLOCK_SPACING_AFTER: u32 = 200;
const LIST_SPACING_AFTER: u32 = 100;

/// Builds a complete `.docx` archive in memory
///
/// The first paragraph is a bold `URL: <url>` header; each block follows as
/// one paragraph.
pub fn build_docx(blocks: &[ContentBlock], url: &str) -> OutputResult<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let document = document_xml(blocks, url);
    let styles = styles_xml();
    let numbering = numbering_xml();
    let core = core_xml(url);
    let parts: [(&str, &[u8]); 8] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", ROOT_RELS_XML),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML),
        ("word/document.xml", document.as_bytes()),
        ("word/styles.xml", styles.as_bytes()),
        ("word/numbering.xml", numbering.as_bytes()),
        ("docProps/core.xml", core.as_bytes()),
        ("docProps/app.xml", APP_XML),
    ];

    for (name, bytes) in parts {
        zip.start_file(name, options)?;
        zip.write_all(bytes).map_err(ZipError::Io)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Writes `<docx_root>/<route>.docx` and returns its path
pub async fn write_docx(
    route: &str,
    blocks: &[ContentBlock],
    docx_root: &Path,
    url: &str,
) -> OutputResult<PathBuf> {
    let path = output_path(docx_root, route, "docx")?;
    let bytes = build_docx(blocks, url)?;
    ensure_parent(&path).await?;

    tokio::fs::write(&path, bytes)
        .await
        .map_err(|source| OutputError::Io {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}

fn document_xml(blocks: &[ContentBlock], url: &str) -> String {
    let mut body = String::new();

    body.push_str(&paragraph_xml(
        &format!("<w:spacing w:after=\"{}\"/>", BLOCK_SPACING_AFTER),
        &run_xml(&format!("URL: {}", url), true),
    ));

    for block in blocks {
        body.push_str(&block_xml(block));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}">
  <w:body>
{}    <w:sectPr>
      <w:pgSz w:w="11906" w:h="16838"/>
      <w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>
    </w:sectPr>
  </w:body>
</w:document>"#,
        W_NS, body
    )
}

fn block_xml(block: &ContentBlock) -> String {
    let text = block.display_text();
    let properties = match block {
        ContentBlock::Heading { level, .. } => format!(
            "<w:pStyle w:val=\"{}\"/><w:spacing w:after=\"{}\"/>",
            level.style_id(),
            BLOCK_SPACING_AFTER
        ),
        ContentBlock::ListItem { ordered, .. } => {
            let num_id = if *ordered {
                DECIMAL_NUM_ID
            } else {
                BULLET_NUM_ID
            };
            format!(
                "<w:pStyle w:val=\"ListParagraph\"/><w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"{}\"/></w:numPr><w:spacing w:after=\"{}\"/>",
                num_id, LIST_SPACING_AFTER
            )
        }
        ContentBlock::Paragraph(_) | ContentBlock::Link { .. } | ContentBlock::Image { .. } => {
            format!("<w:spacing w:after=\"{}\"/>", BLOCK_SPACING_AFTER)
        }
    };
    paragraph_xml(&properties, &run_xml(&text, false))
}

fn paragraph_xml(properties: &str, runs: &str) -> String {
    format!(
        "    <w:p><w:pPr>{}</w:pPr>{}</w:p>\n",
        properties, runs
    )
}

fn run_xml(text: &str, bold: bool) -> String {
    let run_properties = if bold { "<w:rPr><w:b/></w:rPr>" } else { "" };
    format!(
        "<w:r>{}<w:t xml:space=\"preserve\">{}</w:t></w:r>",
        run_properties,
        xml_escape(text)
    )
}

fn styles_xml() -> String {
    let headings: String = [("Heading1", 1, 32), ("Heading2", 2, 26), ("Heading3", 3, 24)]
        .iter()
        .map(|(id, level, size)| {
            format!(
                r#"  <w:style w:type="paragraph" w:styleId="{id}">
    <w:name w:val="heading {level}"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="{outline}"/></w:pPr>
    <w:rPr><w:b/><w:sz w:val="{size}"/></w:rPr>
  </w:style>
"#,
                id = id,
                level = level,
                outline = level - 1,
                size = size
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{}">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
    <w:rPr><w:sz w:val="22"/></w:rPr>
  </w:style>
{}  <w:style w:type="paragraph" w:styleId="ListParagraph">
    <w:name w:val="List Paragraph"/>
    <w:basedOn w:val="Normal"/>
    <w:pPr><w:ind w:left="720"/></w:pPr>
  </w:style>
</w:styles>"#,
        W_NS, headings
    )
}

fn numbering_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="{ns}">
  <w:abstractNum w:abstractNumId="0">
    <w:multiLevelType w:val="singleLevel"/>
    <w:lvl w:ilvl="0">
      <w:start w:val="1"/>
      <w:numFmt w:val="bullet"/>
      <w:lvlText w:val="&#8226;"/>
      <w:lvlJc w:val="left"/>
      <w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr>
    </w:lvl>
  </w:abstractNum>
  <w:abstractNum w:abstractNumId="1">
    <w:multiLevelType w:val="singleLevel"/>
    <w:lvl w:ilvl="0">
      <w:start w:val="1"/>
      <w:numFmt w:val="decimal"/>
      <w:lvlText w:val="%1."/>
      <w:lvlJc w:val="left"/>
      <w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr>
    </w:lvl>
  </w:abstractNum>
  <w:num w:numId="{bullet}"><w:abstractNumId w:val="0"/></w:num>
  <w:num w:numId="{decimal}"><w:abstractNumId w:val="1"/></w:num>
</w:numbering>"#,
        ns = W_NS,
        bullet = BULLET_NUM_ID,
        decimal = DECIMAL_NUM_ID
    )
}

fn core_xml(url: &str) -> String {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{title}</dc:title>
  <dc:source>{title}</dc:source>
  <dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">{now}</dcterms:modified>
</cp:coreProperties>"#,
        title = xml_escape(url),
        now = now
    )
}

/// Escapes markup characters and drops control characters XML 1.0 forbids
fn xml_escape(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect::<String>()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
