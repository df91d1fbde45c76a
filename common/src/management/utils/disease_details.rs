use serde::{Deserialize, Serialize};

/// Row of `disease_on_leaf` as shown to the user. Every column is nullable in the table.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DiseaseDetails {
    pub disease_km: Option<String>,
    pub cure: Option<String>,
    #[serde(rename = "symtom")]
    pub symptom: Option<String>,
    pub reference: Option<String>,
}

impl DiseaseDetails {
    pub fn new<T: Into<String>, U: Into<String>, V: Into<String>, W: Into<String>>(disease_km: T, cure: U, symptom: V, reference: W) -> Self {
        Self {
            disease_km: Some(disease_km.into()),
            cure: Some(cure.into()),
            symptom: Some(symptom.into()),
            reference: Some(reference.into()),
        }
    }
}
