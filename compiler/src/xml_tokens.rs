use std::io::Write;

use xml::{writer::XmlEvent, EmitterConfig};

use crate::{error::JackError, tokens::Token};

/// Writes the token listing as `<tokens>` with one element per token, named
/// after its kind.
pub fn write_tokens_xml<W: Write>(tokens: &[Token], out: W) -> Result<(), JackError> {
    let mut writer = EmitterConfig::new()
        .perform_indent(true)
        .create_writer(out);

    writer.write(XmlEvent::start_element("tokens"))?;
    for t in tokens {
        let tag = t.kind.to_string();
        writer.write(XmlEvent::start_element(tag.as_str()))?;
        writer.write(XmlEvent::characters(&t.text))?;
        writer.write(XmlEvent::end_element())?;
    }
    writer.write(XmlEvent::end_element())?;
    writer.into_inner().flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Tokenizer;

    #[test]
    fn lists_every_token() {
        let stream = Tokenizer::new()
            .tokenize_str("if (x < 1) { let s = \"a&b\"; }")
            .unwrap();
        let mut out = Vec::new();
        write_tokens_xml(stream.as_slice(), &mut out).unwrap();
        let xml = String::from_utf8(out).unwrap();
        assert!(xml.contains("<tokens>"));
        assert!(xml.contains("<keyword>if</keyword>"));
        assert!(xml.contains("<symbol>&lt;</symbol>"));
        assert!(xml.contains("<integerConstant>1</integerConstant>"));
        assert!(xml.contains("<stringConstant>a&amp;b</stringConstant>"));
        assert_eq!(13, xml.matches("</").count() - 1);
    }
}
