//! Reload an attributed graph from a GraphML file.
//!
//! Nodes get their rank from their order of appearance in the file. The node attribute is the content
//! of the `<data>` element whose key is declared with `attr.name="attr"` for nodes (if no such key is
//! declared, a data with key `attr` is used). A node without this data gets an empty attribute.
//!
//! Edges are read as undirected, self loops and parallel edges are dropped by [AttributedGraph::new].

use anyhow::anyhow;

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexSet;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::graph::AttributedGraph;

/// the attr.name declared for the node attribute
const NODE_ATTR_NAME: &str = "attr";


/// reload a graph from a GraphML file
pub fn read_graphml(filepath: &Path) -> anyhow::Result<AttributedGraph> {
    let fileres = OpenOptions::new().read(true).open(filepath);
    if fileres.is_err() {
        log::error!("read_graphml : could not open file {:?}", filepath.as_os_str());
        return Err(anyhow!("read_graphml could not open file {:?}", filepath.as_os_str()));
    }
    let graph = parse_graphml(BufReader::new(fileres?));
    if let Err(e) = &graph {
        log::error!("read_graphml : failed to parse {:?} : {}", filepath.as_os_str(), e);
    }
    graph
} // end of read_graphml


// value of an attribute of an element, by its full name
fn get_attribute(element: &BytesStart, name: &[u8]) -> anyhow::Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}


/// parse GraphML from any buffered reader
pub fn parse_graphml<R: BufRead>(input: R) -> anyhow::Result<AttributedGraph> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::<u8>::new();
    //
    let mut attr_key: Option<String> = None;
    let mut node_ids = IndexSet::<String>::new();
    let mut attrs = Vec::<String>::new();
    let mut edge_ids = Vec::<(String, String)>::new();
    // rank of node being read, and whether we are in its attribute data
    let mut current_node: Option<usize> = None;
    let mut in_attr_data = false;
    //
    loop {
        let event = reader.read_event_into(&mut buf)?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                match e.local_name().as_ref() {
                    b"graph" => {
                        if get_attribute(e, b"edgedefault")?.as_deref() == Some("directed") {
                            log::warn!("parse_graphml : directed graph, edge directions are ignored");
                        }
                    }
                    b"key" => {
                        let for_what = get_attribute(e, b"for")?;
                        let for_nodes = matches!(for_what.as_deref(), None | Some("node") | Some("all"));
                        if for_nodes && get_attribute(e, b"attr.name")?.as_deref() == Some(NODE_ATTR_NAME) {
                            attr_key = get_attribute(e, b"id")?;
                            log::debug!("parse_graphml : node attribute key {:?}", attr_key);
                        }
                    }
                    b"node" => {
                        let id = get_attribute(e, b"id")?.ok_or_else(|| anyhow!("node without id"))?;
                        let (rank, inserted) = node_ids.insert_full(id.clone());
                        if !inserted {
                            return Err(anyhow!("node id {} declared twice", id));
                        }
                        attrs.push(String::new());
                        current_node = if is_empty { None } else { Some(rank) };
                    }
                    b"data" => {
                        let key = get_attribute(e, b"key")?;
                        let expected = attr_key.as_deref().unwrap_or(NODE_ATTR_NAME);
                        in_attr_data = !is_empty && current_node.is_some() && key.as_deref() == Some(expected);
                    }
                    b"edge" => {
                        let source = get_attribute(e, b"source")?.ok_or_else(|| anyhow!("edge without source"))?;
                        let target = get_attribute(e, b"target")?.ok_or_else(|| anyhow!("edge without target"))?;
                        edge_ids.push((source, target));
                    }
                    _ => {}
                }
            }
            Event::Text(e) => {
                if in_attr_data {
                    if let Some(rank) = current_node {
                        attrs[rank].push_str(&e.unescape()?);
                    }
                }
            }
            Event::CData(e) => {
                if in_attr_data {
                    if let Some(rank) = current_node {
                        let content = e.into_inner();
                        let text = std::str::from_utf8(&content).map_err(|err| anyhow!("node {} : attribute CDATA not utf8, {}", rank, err))?;
                        attrs[rank].push_str(text);
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"data" => in_attr_data = false,
                b"node" => current_node = None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        } // end match event
        buf.clear();
    } // end loop
    //
    let mut edges = Vec::<(usize, usize)>::with_capacity(edge_ids.len());
    for (source, target) in &edge_ids {
        let a = node_ids.get_index_of(source).ok_or_else(|| anyhow!("edge source {} is not a node", source))?;
        let b = node_ids.get_index_of(target).ok_or_else(|| anyhow!("edge target {} is not a node", target))?;
        edges.push((a, b));
    }
    log::debug!("parse_graphml : nb nodes {}, nb edges {}", attrs.len(), edges.len());
    Ok(AttributedGraph::new(attrs, &edges)?)
} // end of parse_graphml


//========================================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use crate::graph::LabelledGraphT;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    const TRIANGLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <key id="d0" for="node" attr.name="attr" attr.type="string"/>
  <key id="d1" for="node" attr.name="color" attr.type="string"/>
  <graph id="G" edgedefault="undirected">
    <node id="n0"><data key="d0">C</data><data key="d1">red</data></node>
    <node id="n1"><data key="d1">blue</data><data key="d0">O</data></node>
    <node id="n2"/>
    <edge source="n0" target="n1"/>
    <edge source="n1" target="n2"/>
    <edge source="n2" target="n0"/>
    <edge source="n0" target="n2"/>
  </graph>
</graphml>"#;

    #[test]
    fn test_parse_triangle() {
        log_init_test();
        //
        let graph = parse_graphml(TRIANGLE.as_bytes()).unwrap();
        assert_eq!(graph.get_nb_nodes(), 3);
        assert_eq!(graph.get_attrs(), vec!["C", "O", ""]);
        // the duplicated edge is dropped
        assert_eq!(graph.get_nb_edges(), 3);
        assert!(graph.has_edge(2, 0));
        assert_eq!(graph.get_degree(1), 2);
    }

    #[test]
    fn test_parse_without_key_declaration() {
        log_init_test();
        //
        let xml = r#"<graphml><graph edgedefault="undirected">
            <node id="a"><data key="attr">x &amp; y</data></node>
            <node id="b"><data key="attr">z</data></node>
            <edge source="b" target="a"/>
            </graph></graphml>"#;
        let graph = parse_graphml(xml.as_bytes()).unwrap();
        assert_eq!(graph.get_attrs(), vec!["x & y", "z"]);
        assert!(graph.has_edge(0, 1));
    }

    #[test]
    fn test_parse_cdata_attribute() {
        log_init_test();
        //
        let xml = r#"<graphml><key id="d0" for="node" attr.name="attr"/><graph>
            <node id="a"><data key="d0"><![CDATA[C]]></data></node>
            <node id="b"><data key="d0">N<![CDATA[<H>]]></data></node>
            </graph></graphml>"#;
        let graph = parse_graphml(xml.as_bytes()).unwrap();
        assert_eq!(graph.get_attrs(), vec!["C", "N<H>"]);
        // invalid utf8 in CDATA is an error
        let mut bytes = br#"<graphml><graph><node id="a"><data key="attr"><![CDATA["#.to_vec();
        bytes.push(0xff);
        bytes.extend_from_slice(b"]]></data></node></graph></graphml>");
        assert!(parse_graphml(&bytes[..]).is_err());
    }

    #[test]
    fn test_parse_errors() {
        log_init_test();
        //
        let unknown = r#"<graphml><graph><node id="a"/><edge source="a" target="b"/></graph></graphml>"#;
        assert!(parse_graphml(unknown.as_bytes()).is_err());
        let twice = r#"<graphml><graph><node id="a"/><node id="a"/></graph></graphml>"#;
        assert!(parse_graphml(twice.as_bytes()).is_err());
        assert!(read_graphml(Path::new("/nonexistent/graph_0.graphml")).is_err());
    }
} // end of mod tests
