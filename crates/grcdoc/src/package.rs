//! `.docx` packaging.
//!
//! Zips the WordprocessingML parts produced by [`grcdoc_core::serialize`]
//! together with the content-type and relationship parts.

use std::io::{Cursor, Seek, Write};

use grcdoc_core::serialize::{
    core_properties_xml, document_xml, numbering_xml, settings_xml, styles_xml,
};
use grcdoc_core::{Document, Theme};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::Result;

/// Serialize a document into `.docx` bytes
pub fn to_docx(document: &Document, theme: &Theme) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    write_docx(document, theme, &mut cursor)?;
    Ok(cursor.into_inner())
}

/// Serialize a document as a `.docx` package into any seekable sink
pub fn write_docx<W: Write + Seek>(document: &Document, theme: &Theme, sink: W) -> Result<()> {
    let mut zip = ZipWriter::new(sink);
    let opt = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", opt)?;
    zip.write_all(content_types_xml().as_bytes())?;

    zip.add_directory("_rels/", opt)?;
    zip.start_file("_rels/.rels", opt)?;
    zip.write_all(package_rels_xml().as_bytes())?;

    zip.add_directory("docProps/", opt)?;
    zip.start_file("docProps/core.xml", opt)?;
    zip.write_all(core_properties_xml(document).as_bytes())?;

    zip.add_directory("word/", opt)?;
    zip.add_directory("word/_rels/", opt)?;

    zip.start_file("word/document.xml", opt)?;
    zip.write_all(document_xml(document, theme).as_bytes())?;

    zip.start_file("word/_rels/document.xml.rels", opt)?;
    zip.write_all(document_rels_xml().as_bytes())?;

    zip.start_file("word/styles.xml", opt)?;
    zip.write_all(styles_xml(theme).as_bytes())?;

    zip.start_file("word/numbering.xml", opt)?;
    zip.write_all(numbering_xml().as_bytes())?;

    zip.start_file("word/settings.xml", opt)?;
    zip.write_all(settings_xml().as_bytes())?;

    zip.finish()?;
    log::debug!(
        "packaged document {:?} ({} sections)",
        document.title,
        document.sections.len()
    );
    Ok(())
}

fn content_types_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
  <Override PartName="/word/settings.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
</Types>"#
}

fn package_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>"#
}

fn document_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings" Target="settings.xml"/>
</Relationships>"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_package_parts() {
        let document = Document::new("Empty");
        let bytes = to_docx(&document, &Theme::default()).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "word/document.xml",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "word/numbering.xml",
            "word/settings.xml",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing part {name}");
        }

        let mut core = String::new();
        archive
            .by_name("docProps/core.xml")
            .unwrap()
            .read_to_string(&mut core)
            .unwrap();
        assert!(core.contains("<dc:title>Empty</dc:title>"));
    }
}
