//! Sinks for drawn elements.

use crate::figure::Element;

/// Receives the elements produced by a renderer.
pub trait Document {
    fn attach(&mut self, element: Element);
}

impl Document for Vec<Element> {
    fn attach(&mut self, element: Element) {
        self.push(element);
    }
}

/// An SVG document of a fixed pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    width: f64,
    height: f64,
    elements: Vec<Element>,
}

impl SvgDocument {
    pub fn new(width: f64, height: f64) -> Self {
        SvgDocument {
            width,
            height,
            elements: Vec::new(),
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Returns a string of SVG code depicting the document's elements on a
    /// white background. The string always uses Unix newlines (\n).
    pub fn to_svg_string(&self) -> String {
        let mut result = String::new();
        result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
        result += concat!(
            "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" ",
            "\"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n"
        );
        result += &format!(
            concat!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" ",
                "width=\"{0}\" height=\"{1}\" viewBox=\"0 0 {0} {1}\" stroke=\"none\">\n"
            ),
            self.width, self.height
        );
        result += "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n";
        result += "\t<g fill=\"#000000\">\n";
        for element in &self.elements {
            result += "\t\t";
            result += &element.to_svg();
            result += "\n";
        }
        result += "\t</g>\n";
        result += "</svg>\n";
        result
    }
}

impl Document for SvgDocument {
    fn attach(&mut self, element: Element) {
        self.elements.push(element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let doc = SvgDocument::new(20.0, 20.0);
        let svg = doc.to_svg_string();
        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(svg.contains("viewBox=\"0 0 20 20\""));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_elements_are_serialized_in_order() {
        let mut doc = SvgDocument::new(10.0, 10.0);
        doc.attach(Element::rect(0.0, 0.0, 5.0, 5.0));
        doc.attach(Element::circle(7.5, 7.5, 2.5));
        let svg = doc.to_svg_string();
        let rect = svg.find("<rect x=\"0\"").unwrap();
        let circle = svg.find("<circle cx=\"7.5\"").unwrap();
        assert!(rect < circle);
        assert_eq!(doc.elements().len(), 2);
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<Element> = Vec::new();
        sink.attach(Element::circle(1.0, 1.0, 1.0));
        assert_eq!(sink.len(), 1);
    }
}
