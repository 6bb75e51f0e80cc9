use cabinet_core::RowView;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Candidate keys for person rows.
pub mod keys {
    use cabinet_core::Candidates;

    pub const ID: Candidates = &["id", "uuid", "ministre_id"];
    pub const FIRST_NAME: Candidates = &["firstName", "first_name", "prenom"];
    pub const LAST_NAME: Candidates = &["lastName", "last_name", "nom"];
    pub const FULL_NAME: Candidates = &["fullName", "full_name", "nom_complet", "name"];
    pub const ROLE: Candidates = &["role", "titre", "fonction", "title"];
    pub const PARTY: Candidates = &["party", "parti", "parti_politique"];
    pub const PORTFOLIO: Candidates = &["portfolio", "portefeuille", "ministere", "ministry"];
    pub const PHOTO: Candidates = &["photoUrl", "photo_url", "photo", "image_url", "avatar"];
    pub const RANK: Candidates = &["rank", "rang", "ordre", "protocol_order"];
}

/// A member of the government, as shown in the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Minister {
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub role: String,
    pub party: Option<String>,
    pub portfolio: Option<String>,
    pub photo_url: Option<String>,
    /// Protocol rank; lower comes first.
    pub rank: Option<i64>,
}

impl Minister {
    /// Read a person row. Rows without any name are rejected.
    pub fn from_row(row: &RowView<'_>) -> Option<Self> {
        let first_name = row.text(keys::FIRST_NAME).unwrap_or_default();
        let last_name = row.text(keys::LAST_NAME).unwrap_or_default();
        let full_name = row.text(keys::FULL_NAME).unwrap_or_else(|| {
            [first_name.as_str(), last_name.as_str()]
                .iter()
                .filter(|part| !part.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(" ")
        });
        if full_name.is_empty() {
            return None;
        }

        Some(Self {
            id: row.text(keys::ID),
            first_name,
            last_name,
            full_name,
            role: row.text(keys::ROLE).unwrap_or_default(),
            party: row.text(keys::PARTY),
            portfolio: row.text(keys::PORTFOLIO),
            photo_url: row.text(keys::PHOTO),
            rank: row.integer(keys::RANK),
        })
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        RowView::from_value(value).and_then(|row| Self::from_row(&row))
    }

    /// Text searched by the directory filter.
    pub(crate) fn haystack(&self) -> String {
        let mut parts = vec![self.full_name.as_str(), self.role.as_str()];
        parts.extend(self.party.as_deref());
        parts.extend(self.portfolio.as_deref());
        parts.join(" ")
    }
}

/// Normalize person rows, dropping rows without a name.
pub fn normalize_ministers(rows: &[Value]) -> Vec<Minister> {
    let ministers: Vec<_> = rows.iter().filter_map(Minister::from_value).collect();
    if ministers.len() < rows.len() {
        tracing::trace!(
            kept = ministers.len(),
            skipped = rows.len() - ministers.len(),
            "dropped person rows without a name"
        );
    }
    ministers
}
