use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::customer::CustomerDetails;

#[derive(Deserialize, Serialize, Validate, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub sex: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub customer_group: String,
}

impl CustomerRequest {
    pub fn details(&self) -> CustomerDetails {
        CustomerDetails {
            name: self.name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            address: self.address.clone(),
            sex: self.sex.clone(),
            birthday: self.birthday,
            description: self.description.clone(),
            status: self.status.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub sex: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub customer_group: String,
    pub creator: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}
