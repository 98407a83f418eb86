//! Small wrapper around `quick_xml::Writer` shared by the XML-based formats.
//!
//! Indentation and newlines are written explicitly so the generated files
//! look the same as hand-maintained resource files.

use std::borrow::Cow;

use quick_xml::{
    Writer,
    escape::escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::Error;

pub(crate) struct XmlDocument {
    writer: Writer<Vec<u8>>,
}

impl XmlDocument {
    /// Starts a document with the `<?xml … encoding="utf-8"?>` declaration.
    pub fn new() -> Result<Self, Error> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(XmlDocument { writer })
    }

    /// Writes whitespace (or any other pre-escaped text) between elements.
    pub fn raw(&mut self, escaped: &str) -> Result<(), Error> {
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(escaped)))?;
        Ok(())
    }

    pub fn doctype(&mut self, content: &str) -> Result<(), Error> {
        self.writer
            .write_event(Event::DocType(BytesText::from_escaped(content)))?;
        self.raw("\n")
    }

    /// Writes `<!--text-->`, breaking up any `--` the text contains.
    pub fn comment(&mut self, text: &str) -> Result<(), Error> {
        let text = comment_safe(text);
        self.writer
            .write_event(Event::Comment(BytesText::from_escaped(text.as_ref())))?;
        Ok(())
    }

    pub fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), Error> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Start(element))?;
        Ok(())
    }

    pub fn end(&mut self, name: &str) -> Result<(), Error> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Writes `<name attrs…>escaped</name>`; `escaped` must already be XML-escaped.
    pub fn element(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
        escaped: &str,
    ) -> Result<(), Error> {
        self.start(name, attributes)?;
        self.raw(escaped)?;
        self.end(name)
    }

    pub fn finish(self) -> Result<String, Error> {
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}

/// XML-escapes character data (`<`, `>`, `&`, `'` and `"`).
pub(crate) fn escape_text(text: &str) -> Cow<'_, str> {
    escape(text)
}

/// Makes text safe to put inside `<!-- -->`.
pub(crate) fn comment_safe(text: &str) -> Cow<'_, str> {
    if !text.contains("--") && !text.ends_with('-') {
        return Cow::Borrowed(text);
    }
    let mut out = text.to_string();
    while out.contains("--") {
        out = out.replace("--", "- -");
    }
    if out.ends_with('-') {
        out.push(' ');
    }
    Cow::Owned(out)
}

/// Checks that `xml` reads back without errors.
#[cfg(test)]
pub(crate) fn is_well_formed(xml: &str) -> bool {
    let mut reader = quick_xml::Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => return true,
            Ok(_) => continue,
            Err(_) => return false,
        }
    }
}
