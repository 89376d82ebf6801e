use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Renderable form of an assistant reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderedMessage {
    /// Reply shown as-is
    Text { content: String },
    /// Reply recognised as one or more place descriptions
    Cards {
        #[serde(skip_serializing_if = "Option::is_none")]
        intro: Option<String>,
        cards: Vec<PlaceCard>,
    },
}

impl RenderedMessage {
    pub fn plain(text: &str) -> Self {
        RenderedMessage::Text {
            content: text.to_string(),
        }
    }
}

/// One labelled line of a place card ("Harga Tiket: Rp10.000")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CardField {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceCard {
    pub name: Option<String>,
    pub category: Option<String>,
    pub tagline: Option<String>,
    pub lokasi: Option<String>,
    pub harga_tiket: Option<String>,
    pub jam_operasi: Option<String>,
    /// Every `Key: Value` line in reply order, including the typed ones above
    pub fields: Vec<CardField>,
    pub facilities: Vec<String>,
    pub notes: Vec<String>,
}

impl PlaceCard {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.tagline.is_none()
            && self.fields.is_empty()
            && self.facilities.is_empty()
    }

    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label.eq_ignore_ascii_case(label))
            .map(|f| f.value.as_str())
    }
}
