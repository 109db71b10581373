//! Field-mapping policies: how each route family names record fields and what it says back.

use crate::record::{self, Patch, RecordPatch};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Number;

/// Response messages for one route family.
#[derive(Debug)]
pub struct RouteMessages {
    pub list_failed: &'static str,
    pub read_missing: &'static str,
    pub read_failed: &'static str,
    pub created: &'static str,
    pub create_failed: &'static str,
    pub updated: &'static str,
    pub update_missing: &'static str,
    pub update_failed: &'static str,
    pub deleted: &'static str,
    pub delete_missing: &'static str,
    pub delete_failed: &'static str,
}

/// A route family's request schema and wording over the one shared collection.
pub trait FieldMapping: Send + Sync + 'static {
    /// Request body accepted by create and update.
    type Body: DeserializeOwned;

    /// Key wrapping the record in create/update responses.
    const ENTRY_KEY: &'static str;

    const MESSAGES: RouteMessages;

    fn into_patch(body: Self::Body) -> RecordPatch;
}

/// `/api/farmers`: district, town, location, crop, contact.
pub struct Current;

#[derive(Debug, Default, Deserialize)]
pub struct CurrentBody {
    #[serde(default, deserialize_with = "record::text")]
    pub district: Patch<String>,
    #[serde(default, deserialize_with = "record::text")]
    pub town: Patch<String>,
    #[serde(default, deserialize_with = "record::text")]
    pub location: Patch<String>,
    #[serde(default, deserialize_with = "record::text")]
    pub crop: Patch<String>,
    #[serde(default, deserialize_with = "record::text")]
    pub contact: Patch<String>,
}

impl FieldMapping for Current {
    type Body = CurrentBody;

    const ENTRY_KEY: &'static str = "entry";

    const MESSAGES: RouteMessages = RouteMessages {
        list_failed: "Error fetching data",
        read_missing: "Farmer not found",
        read_failed: "Error retrieving farmer",
        created: "Data added successfully",
        create_failed: "Error saving data",
        updated: "Data updated successfully",
        update_missing: "Farmer not found for update",
        update_failed: "Error updating data",
        deleted: "Data deleted successfully",
        delete_missing: "Farmer not found for deletion",
        delete_failed: "Error deleting data",
    };

    fn into_patch(body: CurrentBody) -> RecordPatch {
        RecordPatch {
            district: body.district,
            town: body.town,
            location: body.location,
            crop: body.crop,
            contact: body.contact,
            ..Default::default()
        }
    }
}

/// `/farmers` and `/farmer`: cropName maps to crop, landArea to acres.
pub struct Legacy;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyBody {
    #[serde(default, deserialize_with = "record::text")]
    pub crop_name: Patch<String>,
    #[serde(default, deserialize_with = "record::number")]
    pub land_area: Patch<Number>,
    #[serde(default, deserialize_with = "record::number")]
    pub price: Patch<Number>,
    #[serde(default, deserialize_with = "record::text")]
    pub district: Patch<String>,
    #[serde(default, deserialize_with = "record::text")]
    pub town: Patch<String>,
    #[serde(default, deserialize_with = "record::text")]
    pub location: Patch<String>,
}

impl FieldMapping for Legacy {
    type Body = LegacyBody;

    const ENTRY_KEY: &'static str = "crop";

    const MESSAGES: RouteMessages = RouteMessages {
        list_failed: "Error fetching crops",
        read_missing: "Crop not found",
        read_failed: "Error fetching crop",
        created: "Crop added successfully",
        create_failed: "Error adding crop",
        updated: "Crop updated successfully",
        update_missing: "Crop not found for update",
        update_failed: "Error updating crop",
        deleted: "Crop deleted successfully",
        delete_missing: "Crop not found for deletion",
        delete_failed: "Error deleting crop",
    };

    fn into_patch(body: LegacyBody) -> RecordPatch {
        RecordPatch {
            crop: body.crop_name,
            acres: body.land_area,
            price: body.price,
            district: body.district,
            town: body.town,
            location: body.location,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_body_renames_fields() {
        let body: LegacyBody =
            serde_json::from_value(json!({"cropName": "Wheat", "landArea": "3", "price": 2100, "town": "Nashik"}))
                .unwrap();
        let patch = Legacy::into_patch(body);
        assert_eq!(patch.crop, Patch::Set("Wheat".into()));
        assert_eq!(patch.acres, Patch::Set(Number::from(3)));
        assert_eq!(patch.price, Patch::Set(Number::from(2100)));
        assert_eq!(patch.town, Patch::Set("Nashik".into()));
        assert_eq!(patch.contact, Patch::Keep);
    }

    #[test]
    fn current_body_ignores_legacy_and_unknown_fields() {
        let body: CurrentBody =
            serde_json::from_value(json!({"crop": "Rice", "cropName": "Wheat", "price": 5, "contact": 9999}))
                .unwrap();
        let patch = Current::into_patch(body);
        assert_eq!(patch.crop, Patch::Set("Rice".into()));
        assert_eq!(patch.contact, Patch::Set("9999".into()));
        assert_eq!(patch.price, Patch::Keep);
        assert_eq!(patch.acres, Patch::Keep);
    }

    #[test]
    fn explicit_null_clears() {
        let body: CurrentBody = serde_json::from_value(json!({"town": null})).unwrap();
        assert_eq!(body.town, Patch::Clear);
        assert_eq!(body.district, Patch::Keep);
    }
}
