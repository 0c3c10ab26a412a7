use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub project_name: String,
    #[serde(rename(deserialize = "companyID"))]
    pub account_id: i64,
}
