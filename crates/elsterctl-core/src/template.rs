//! Starter transfer XML for `message send`
//!
//! Renders a "sonstige Nachricht" envelope with a filled-in transfer header.
//! The output is a scaffold for the user to edit; it is not validated
//! against the ELSTER schema.

use std::fs;
use std::path::Path;

use crate::errors::{ElsterError, Result};

/// Values substituted into the template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    pub hersteller_id: String,
    pub daten_lieferant: String,
    pub subject: String,
    pub body: String,
    pub testmerker: String,
}

impl MessageTemplate {
    /// Template with default placeholders for the given manufacturer id
    pub fn new(hersteller_id: impl Into<String>) -> Self {
        Self {
            hersteller_id: hersteller_id.into(),
            daten_lieferant: "elsterctl".to_string(),
            subject: "Test message".to_string(),
            body: "This is a template message body.".to_string(),
            testmerker: "700000004".to_string(),
        }
    }

    /// Render the template to an XML string
    pub fn render(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Elster xmlns="http://www.elster.de/elsterxml/schema/v11">
    <TransferHeader version="11">
        <Verfahren>ElsterAnmeldung</Verfahren>
        <DatenArt>sonstige_nachricht</DatenArt>
        <Vorgang>send-Auth</Vorgang>
        <Testmerker>{testmerker}</Testmerker>
        <HerstellerID>{hersteller_id}</HerstellerID>
        <DatenLieferant>{daten_lieferant}</DatenLieferant>
    </TransferHeader>
    <DatenTeil>
        <Nutzdatenblock>
            <NutzdatenHeader version="11">
                <NutzdatenTicket>0000000000000000000000000000000</NutzdatenTicket>
            </NutzdatenHeader>
            <Nutzdaten>
                <Nachricht>
                    <Betreff>{subject}</Betreff>
                    <Text>{body}</Text>
                </Nachricht>
            </Nutzdaten>
        </Nutzdatenblock>
    </DatenTeil>
</Elster>
"#,
            testmerker = escape_xml(&self.testmerker),
            hersteller_id = escape_xml(&self.hersteller_id),
            daten_lieferant = escape_xml(&self.daten_lieferant),
            subject = escape_xml(&self.subject),
            body = escape_xml(&self.body),
        )
    }

    /// Render and write to `output`, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `ElsterError::Io` if the directory or file cannot be written.
    pub fn write_to(&self, output: &Path) -> Result<()> {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ElsterError::io("create_template_dir", e))?;
        }
        fs::write(output, self.render()).map_err(|e| ElsterError::io("write_template", e))
    }
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
