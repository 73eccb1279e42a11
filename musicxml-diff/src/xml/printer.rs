//! XML printer that serializes DOM trees.
//!
//! Output reproduces the parsed structure: text nodes are written verbatim
//! (escaped), attributes are sorted for deterministic output, and empty
//! elements use the self-closing form. Exact byte-level formatting of the
//! input (attribute order, quoting) is not preserved.

use std::io::Write;

use crate::node::{NodeRef, XmlContent};

/// XML printer that outputs DOM trees.
pub struct XmlPrinter<W: Write> {
    writer: W,
}

impl<W: Write> XmlPrinter<W> {
    /// Creates a new XML printer.
    pub fn new(writer: W) -> Self {
        XmlPrinter { writer }
    }

    /// Prints a document node with an XML declaration.
    pub fn print(&mut self, document: &NodeRef) -> std::io::Result<()> {
        writeln!(self.writer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        for child in document.borrow().children() {
            self.print_node(child)?;
        }
        self.writer.flush()
    }

    fn print_node(&mut self, node: &NodeRef) -> std::io::Result<()> {
        let borrowed = node.borrow();
        match borrowed.content() {
            Some(XmlContent::Text(text)) => {
                write!(self.writer, "{}", escape_text(text.text()))?;
            }
            Some(XmlContent::Comment(comment)) => {
                write!(self.writer, "<!--{}-->", comment.text())?;
            }
            Some(XmlContent::ProcessingInstruction(pi)) => {
                if pi.content().is_empty() {
                    write!(self.writer, "<?{}?>", pi.target())?;
                } else {
                    write!(self.writer, "<?{} {}?>", pi.target(), pi.content())?;
                }
            }
            Some(XmlContent::Element(elem)) => {
                write!(self.writer, "<{}", elem.qname())?;

                let mut attr_names: Vec<&String> = elem.attributes().keys().collect();
                attr_names.sort();
                for name in attr_names {
                    write!(
                        self.writer,
                        " {}=\"{}\"",
                        name,
                        escape_attr(&elem.attributes()[name])
                    )?;
                }

                if borrowed.child_count() == 0 {
                    write!(self.writer, "/>")?;
                } else {
                    write!(self.writer, ">")?;
                    for child in borrowed.children() {
                        self.print_node(child)?;
                    }
                    write!(self.writer, "</{}>", elem.qname())?;
                }
            }
            None => {
                // Document container: print children only.
                for child in borrowed.children() {
                    self.print_node(child)?;
                }
            }
        }
        Ok(())
    }
}

/// Escapes special characters in text content.
fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escapes special characters in attribute values.
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

/// Prints a document node to a string.
pub fn print_to_string(document: &NodeRef) -> std::io::Result<String> {
    let mut output = Vec::new();
    {
        let mut printer = XmlPrinter::new(&mut output);
        printer.print(document)?;
    }
    Ok(String::from_utf8_lossy(&output).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_str;

    #[test]
    fn test_print_simple() {
        let document = parse_str("<root>text</root>").unwrap();
        let output = print_to_string(&document).unwrap();

        assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(output.contains("<root>text</root>"));
    }

    #[test]
    fn test_print_sorted_attributes() {
        let document = parse_str(r##"<note id="n1" color="#FF0000"/>"##).unwrap();
        let output = print_to_string(&document).unwrap();

        assert!(output.contains(r##"<note color="#FF0000" id="n1"/>"##));
    }

    #[test]
    fn test_print_empty_element_self_closes() {
        let document = parse_str("<root><empty></empty></root>").unwrap();
        let output = print_to_string(&document).unwrap();

        assert!(output.contains("<root><empty/></root>"));
    }

    #[test]
    fn test_entity_escaping() {
        let document = parse_str(r#"<root attr="a&amp;b">x &lt; y</root>"#).unwrap();
        let output = print_to_string(&document).unwrap();

        assert!(output.contains(r#"attr="a&amp;b""#));
        assert!(output.contains("x &lt; y"));
    }

    #[test]
    fn test_whitespace_round_trip() {
        let xml = "<score><part>\n  <measure>  </measure>\n</part></score>";
        let document = parse_str(xml).unwrap();
        let output = print_to_string(&document).unwrap();

        // Text nodes, including whitespace-only ones, are reproduced.
        assert!(output.contains("<part>\n  <measure>  </measure>\n</part>"));
    }

    #[test]
    fn test_comment_and_pi_round_trip() {
        let xml = "<?xml-stylesheet href=\"x.css\"?><root><!-- keep --><a/></root>";
        let document = parse_str(xml).unwrap();
        let output = print_to_string(&document).unwrap();

        assert!(output.contains("<?xml-stylesheet href=\"x.css\"?>"));
        assert!(output.contains("<!-- keep -->"));
    }

    #[test]
    fn test_reparse_is_stable() {
        let xml = r#"<doc><sec id="s1"><p>First.</p><p>Second.</p></sec></doc>"#;
        let first = print_to_string(&parse_str(xml).unwrap()).unwrap();
        let second = print_to_string(&parse_str(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
