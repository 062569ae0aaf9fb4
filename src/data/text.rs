use crate::error::Result;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::path::Path;

/// id -> display name mapping from one language's FMG XML documents.
/// entries holding the `%null%` placeholder are not stored.
#[derive(Debug, Default, Clone)]
pub struct FmgText {
    map: HashMap<i64, String>,
}

impl FmgText {
    pub fn get(&self, id: i64) -> Option<&str> {
        self.map.get(&id).map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (i64, &str)> + '_ {
        self.map.iter().map(|(id, name)| (*id, name.as_str()))
    }

    pub fn merge(&mut self, other: FmgText) {
        self.map.extend(other.map);
    }

    /// load `<stem>.fmg.xml` plus its optional `_dlc01` sibling from a
    /// language directory. returns the merged text and the ids the dlc
    /// document introduced (callers track patch-added relics with them).
    pub fn load_merged(dir: &Path, stem: &str) -> Result<(FmgText, Vec<i64>)> {
        let mut merged = FmgText::load(&dir.join(format!("{}.fmg.xml", stem)))?;
        let dlc_path = dir.join(format!("{}_dlc01.fmg.xml", stem));
        let mut dlc_ids = Vec::new();
        if dlc_path.exists() {
            let dlc = FmgText::load(&dlc_path)?;
            dlc_ids.extend(dlc.map.keys().copied());
            merged.merge(dlc);
        }
        Ok((merged, dlc_ids))
    }

    pub fn load(path: &Path) -> Result<FmgText> {
        let xml = std::fs::read_to_string(path)?;
        Self::parse(&xml)
    }

    /// pull `<text id="N">…</text>` elements out of the `/fmg/entries`
    /// document
    pub fn parse(xml: &str) -> Result<FmgText> {
        let mut reader = Reader::from_str(xml);
        let mut map = HashMap::new();
        let mut current: Option<i64> = None;
        loop {
            match reader.read_event()? {
                Event::Start(e) if e.name().as_ref() == b"text" => {
                    current = attribute_id(&e)?;
                }
                Event::Text(e) => {
                    if let Some(id) = current.take() {
                        let name = e.unescape()?.into_owned();
                        if name != "%null%" {
                            map.insert(id, name);
                        }
                    }
                }
                Event::End(e) if e.name().as_ref() == b"text" => {
                    current = None;
                }
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(FmgText { map })
    }
}

fn attribute_id(e: &quick_xml::events::BytesStart) -> Result<Option<i64>> {
    for attribute in e.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        if attribute.key.as_ref() == b"id" {
            let raw = attribute.unescape_value().map_err(quick_xml::Error::from)?;
            return Ok(raw.parse::<i64>().ok());
        }
    }
    Ok(None)
}
