//! Pet profile model.

use serde::{Deserialize, Serialize};

/// A pet profile belonging to exactly one owner.
///
/// Age and weight stay free-form strings ("3 years 4 months", "24 kg");
/// nothing in the core interprets them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: String,
    pub name: String,
    /// Species (e.g., "Dog", "Cat")
    pub species: String,
    pub breed: String,
    pub age: String,
    pub sex: String,
    pub weight: String,
    pub vaccination_status: String,
    pub regular_meds: String,
    /// Ordered image references, first one is the profile picture
    pub photos: Vec<String>,
    /// Owning owner's ID
    pub owner_id: String,
}

impl Pet {
    /// Create a new pet with a generated ID and empty optional details.
    pub fn new(owner_id: impl Into<String>, name: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            id: format!("pet-{}", uuid::Uuid::new_v4()),
            name: name.into(),
            species: species.into(),
            breed: String::new(),
            age: String::new(),
            sex: String::new(),
            weight: String::new(),
            vaccination_status: String::new(),
            regular_meds: String::new(),
            photos: Vec::new(),
            owner_id: owner_id.into(),
        }
    }

    /// Profile picture, if any photo was uploaded.
    pub fn cover_photo(&self) -> Option<&str> {
        self.photos.first().map(String::as_str)
    }
}
