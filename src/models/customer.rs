use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Customer {
    pub customer_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub sex: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub group_id: Uuid,
    pub creator_id: Option<Uuid>,
    pub image_id: Option<Uuid>,
    pub store_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Contact fields shared by customer create and update.
#[derive(Debug, Clone, Default)]
pub struct CustomerDetails {
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub sex: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl Customer {
    pub fn new(details: CustomerDetails, group_id: Uuid, creator_id: Option<Uuid>, store_id: Uuid) -> Self {
        let mut customer = Self {
            customer_id: Uuid::new_v4(),
            name: String::new(),
            email: None,
            phone_number: None,
            address: None,
            sex: None,
            birthday: None,
            description: None,
            status: None,
            group_id,
            creator_id,
            image_id: None,
            store_id,
            created_at: Utc::now(),
        };
        customer.apply(details);
        customer
    }

    pub fn apply(&mut self, details: CustomerDetails) {
        self.name = details.name;
        self.email = details.email;
        self.phone_number = details.phone_number;
        self.address = details.address;
        self.sex = details.sex;
        self.birthday = details.birthday;
        self.description = details.description;
        self.status = details.status;
    }
}
