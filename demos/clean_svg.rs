// Strip editor metadata from an SVG file and print the tidied result.
//
//     cargo run --example clean_svg -- drawing.svg
//
// Without an argument a small built-in drawing is used.
use std::env;
use std::fs;

use xmlcleaner::XmlCleaner;

const DRAWING: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!-- Created with Inkscape (http://www.inkscape.org/) -->
<svg xmlns="http://www.w3.org/2000/svg"
     xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd"
     xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
     xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
     width="210mm" height="297mm" inkscape:version="1.2">
  <sodipodi:namedview id="base" inkscape:zoom="0.35"/>
  <g inkscape:label="Layer 1" inkscape:groupmode="layer" id="layer1">
    <!-- the only shape -->
    <circle cx="100" cy="100" r="50"/>
  </g>
</svg>"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut cleaner = XmlCleaner::new();
    match env::args().nth(1) {
        Some(path) => {
            cleaner.set_xml_bytes(&fs::read(path)?)?;
        }
        None => {
            cleaner.set_xml(DRAWING);
        }
    }

    println!("root element: {}", cleaner.root_element_name()?);
    if let Ok(namespace) = cleaner.default_namespace() {
        println!("default namespace: {}", namespace);
    }
    for (prefix, uri) in cleaner.xml_namespaces()?.sorted() {
        println!("  {} = {}", prefix, uri);
    }

    cleaner
        .remove_xml_comments()?
        .remove_elements_by_prefix("sodipodi")?
        .remove_attributes_by_prefix("inkscape")?
        .remove_attributes_by_prefix("sodipodi")?
        .remove_unused_namespaces()?;

    // the same steps without a stored document
    let xml = xmlcleaner::remove_xml_comments(DRAWING)?;
    let xml = xmlcleaner::remove_elements_by_prefix("sodipodi", &xml)?;
    let xml = xmlcleaner::remove_attributes_by_prefix("inkscape", &xml)?;
    let xml = xmlcleaner::remove_unused_namespaces(&xml)?;
    println!("{}", xml);

    cleaner.set_character_encoding("utf8")?;
    print!("{}", cleaner.tidy_xml()?);
    Ok(())
}
