//! Notion wire form of a block.
//!
//! A block arrives as `{"id", "type": T, T: {payload}, "children": [...]}`:
//! the payload sits under a key named after the discriminant, which serde's
//! tagged-enum representations cannot express directly. Decoding goes through
//! [`RawBlock`] and dispatches on the type name by hand.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::block::{Block, BlockData, BlockType};

#[derive(Deserialize)]
struct RawBlock {
    id: String,
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    children: Option<Vec<Block>>,
    /// Every other key, including the payload and Notion bookkeeping
    /// (`object`, `has_children`, timestamps).
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawBlock::deserialize(deserializer)?;
        into_block(raw).map_err(de::Error::custom)
    }
}

fn into_block(mut raw: RawBlock) -> Result<Block, serde_json::Error> {
    let data = decode_data(&raw.block_type, &mut raw.rest)?;
    Ok(Block {
        id: raw.id,
        data,
        children: raw.children,
    })
}

fn payload<T: DeserializeOwned>(
    rest: &mut Map<String, Value>,
    name: &str,
) -> Result<T, serde_json::Error> {
    let value = rest
        .remove(name)
        .unwrap_or_else(|| Value::Object(Map::new()));
    serde_json::from_value(value)
}

fn decode_data(name: &str, rest: &mut Map<String, Value>) -> Result<BlockData, serde_json::Error> {
    let Some(ty) = BlockType::from_name(name) else {
        return Ok(BlockData::Unknown {
            block_type: name.to_string(),
            payload: rest.remove(name).unwrap_or(Value::Null),
        });
    };

    let data = match ty {
        BlockType::Paragraph => BlockData::Paragraph(payload(rest, name)?),
        BlockType::Heading1 => BlockData::Heading1(payload(rest, name)?),
        BlockType::Heading2 => BlockData::Heading2(payload(rest, name)?),
        BlockType::Heading3 => BlockData::Heading3(payload(rest, name)?),
        BlockType::BulletedListItem => BlockData::BulletedListItem(payload(rest, name)?),
        BlockType::NumberedListItem => BlockData::NumberedListItem(payload(rest, name)?),
        BlockType::ToDo => BlockData::ToDo(payload(rest, name)?),
        BlockType::Toggle => BlockData::Toggle(payload(rest, name)?),
        BlockType::Quote => BlockData::Quote(payload(rest, name)?),
        BlockType::Callout => BlockData::Callout(payload(rest, name)?),
        BlockType::Code => BlockData::Code(payload(rest, name)?),
        BlockType::Table => BlockData::Table(payload(rest, name)?),
        BlockType::TableRow => BlockData::TableRow(payload(rest, name)?),
        BlockType::ColumnList => BlockData::ColumnList,
        BlockType::Column => BlockData::Column,
        BlockType::Divider => BlockData::Divider,
        BlockType::Image => BlockData::Image(payload(rest, name)?),
        BlockType::Video => BlockData::Video(payload(rest, name)?),
        BlockType::Audio => BlockData::Audio(payload(rest, name)?),
        BlockType::File => BlockData::File(payload(rest, name)?),
        BlockType::Pdf => BlockData::Pdf(payload(rest, name)?),
        BlockType::Embed => BlockData::Embed(payload(rest, name)?),
        BlockType::Bookmark => BlockData::Bookmark(payload(rest, name)?),
        BlockType::Equation => BlockData::Equation(payload(rest, name)?),
        BlockType::LinkPreview => BlockData::LinkPreview(payload(rest, name)?),
        BlockType::LinkToPage => BlockData::LinkToPage(payload(rest, name)?),
        BlockType::LinkToContent => BlockData::LinkToContent(payload(rest, name)?),
        BlockType::ChildPage => BlockData::ChildPage(payload(rest, name)?),
        BlockType::ChildDatabase => BlockData::ChildDatabase(payload(rest, name)?),
        BlockType::SyncedBlock => BlockData::SyncedBlock(payload(rest, name)?),
        BlockType::TableOfContents => BlockData::TableOfContents,
        BlockType::Template => BlockData::Template(payload(rest, name)?),
        BlockType::Breadcrumb => BlockData::Breadcrumb,
        BlockType::Mention => BlockData::Mention,
        BlockType::Unsupported => BlockData::Unsupported,
    };
    Ok(data)
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let name = self.type_name();
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("object", "block")?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("type", name)?;

        let empty = Map::new();
        match &self.data {
            BlockData::Paragraph(p)
            | BlockData::BulletedListItem(p)
            | BlockData::NumberedListItem(p)
            | BlockData::Toggle(p)
            | BlockData::Quote(p)
            | BlockData::Template(p) => map.serialize_entry(name, p)?,
            BlockData::Heading1(p) | BlockData::Heading2(p) | BlockData::Heading3(p) => {
                map.serialize_entry(name, p)?
            }
            BlockData::ToDo(p) => map.serialize_entry(name, p)?,
            BlockData::Callout(p) => map.serialize_entry(name, p)?,
            BlockData::Code(p) => map.serialize_entry(name, p)?,
            BlockData::Table(p) => map.serialize_entry(name, p)?,
            BlockData::TableRow(p) => map.serialize_entry(name, p)?,
            BlockData::Image(p)
            | BlockData::Video(p)
            | BlockData::Audio(p)
            | BlockData::File(p)
            | BlockData::Pdf(p) => map.serialize_entry(name, p)?,
            BlockData::Embed(p) => map.serialize_entry(name, p)?,
            BlockData::Bookmark(p) => map.serialize_entry(name, p)?,
            BlockData::Equation(p) => map.serialize_entry(name, p)?,
            BlockData::LinkPreview(p) => map.serialize_entry(name, p)?,
            BlockData::LinkToPage(p) => map.serialize_entry(name, p)?,
            BlockData::LinkToContent(p) => map.serialize_entry(name, p)?,
            BlockData::ChildPage(p) | BlockData::ChildDatabase(p) => map.serialize_entry(name, p)?,
            BlockData::SyncedBlock(p) => map.serialize_entry(name, p)?,
            BlockData::ColumnList
            | BlockData::Column
            | BlockData::Divider
            | BlockData::TableOfContents
            | BlockData::Breadcrumb
            | BlockData::Mention
            | BlockData::Unsupported => map.serialize_entry(name, &empty)?,
            BlockData::Unknown { payload, .. } => map.serialize_entry(name, payload)?,
        }

        map.serialize_entry("has_children", &self.children.is_some())?;
        if let Some(children) = &self.children {
            map.serialize_entry("children", children)?;
        }
        map.end()
    }
}
