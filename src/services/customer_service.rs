use std::sync::Arc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::customer::Customer;
use crate::models::customer_group::CustomerGroup;
use crate::models::staff::Caller;
use crate::payload::customer::{CustomerRequest, CustomerResponse};
use crate::repositories::{
    CustomerGroupRepository, CustomerRepository, MediaRepository, Repositories, StaffRepository,
};
use crate::services::upload_media;
use crate::storage::{FileStorage, UploadedFile};
use crate::utils::validation::validate_payload;

#[derive(Clone)]
pub struct CustomerService {
    customers: Arc<dyn CustomerRepository>,
    groups: Arc<dyn CustomerGroupRepository>,
    staffs: Arc<dyn StaffRepository>,
    media: Arc<dyn MediaRepository>,
    files: Arc<dyn FileStorage>,
}

impl CustomerService {
    pub fn new(repos: &Repositories, files: Arc<dyn FileStorage>) -> Self {
        Self {
            customers: repos.customers.clone(),
            groups: repos.customer_groups.clone(),
            staffs: repos.staffs.clone(),
            media: repos.media.clone(),
            files,
        }
    }

    pub async fn get_all(&self, caller: &Caller) -> Result<Vec<CustomerResponse>, AppError> {
        let customers = self.customers.find_by_store_id(caller.store_id).await?;
        let mut responses = Vec::with_capacity(customers.len());
        for customer in &customers {
            responses.push(self.to_response(customer).await?);
        }
        Ok(responses)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CustomerResponse, AppError> {
        let customer = self.find_customer(id).await?;
        self.to_response(&customer).await
    }

    pub async fn create(
        &self,
        caller: &Caller,
        request: CustomerRequest,
        file: Option<UploadedFile>,
    ) -> Result<CustomerResponse, AppError> {
        validate_payload(&request)?;
        let group = self.find_group_by_name(&request.customer_group, caller.store_id).await?;

        let mut customer = Customer::new(
            request.details(),
            group.group_id,
            Some(caller.staff_id),
            caller.store_id,
        );
        if let Some(file) = file {
            let image = upload_media(self.files.as_ref(), self.media.as_ref(), file).await?;
            customer.image_id = Some(image.media_id);
        }

        self.customers.save(&customer).await?;
        log::info!("Customer {} created by {}", customer.customer_id, caller.email);
        self.to_response(&customer).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: CustomerRequest,
        file: Option<UploadedFile>,
    ) -> Result<CustomerResponse, AppError> {
        validate_payload(&request)?;
        let mut customer = self.find_customer(id).await?;

        let current_group = self.groups.find_by_id(customer.group_id).await?;
        if current_group.map(|g| g.name).as_deref() != Some(request.customer_group.as_str()) {
            let group = self
                .find_group_by_name(&request.customer_group, customer.store_id)
                .await?;
            customer.group_id = group.group_id;
        }

        // the current image is kept unless a new file is sent
        if let Some(file) = file {
            let image = upload_media(self.files.as_ref(), self.media.as_ref(), file).await?;
            customer.image_id = Some(image.media_id);
        }

        customer.apply(request.details());
        self.customers.save(&customer).await?;
        self.to_response(&customer).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let customer = self.find_customer(id).await?;
        self.customers.delete(customer.customer_id).await?;
        log::info!("Customer {} deleted", id);
        Ok(())
    }

    async fn find_customer(&self, id: Uuid) -> Result<Customer, AppError> {
        self.customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer with id {} not found", id)))
    }

    async fn find_group_by_name(&self, name: &str, store_id: Uuid) -> Result<CustomerGroup, AppError> {
        self.groups
            .find_by_name_and_store_id(name, store_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer group {} not found", name)))
    }

    async fn to_response(&self, customer: &Customer) -> Result<CustomerResponse, AppError> {
        let customer_group = self
            .groups
            .find_by_id(customer.group_id)
            .await?
            .map(|g| g.name)
            .unwrap_or_default();
        let creator = match customer.creator_id {
            Some(id) => self.staffs.find_by_id(id).await?.map(|s| s.name),
            None => None,
        };
        let image = match customer.image_id {
            Some(id) => self.media.find_by_id(id).await?.map(|m| m.url),
            None => None,
        };

        Ok(CustomerResponse {
            id: customer.customer_id,
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone_number: customer.phone_number.clone(),
            address: customer.address.clone(),
            sex: customer.sex.clone(),
            birthday: customer.birthday,
            description: customer.description.clone(),
            status: customer.status.clone(),
            customer_group,
            creator,
            image,
            created_at: customer.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::customer_group::CustomerGroupRequest;
    use crate::services::customer_group_service::CustomerGroupService;
    use crate::services::test_support::Fixture;

    async fn seed_groups(fixture: &Fixture) {
        let groups = CustomerGroupService::new(&fixture.repos);
        for name in ["VIP", "Wholesale"] {
            groups
                .create(
                    &fixture.owner,
                    CustomerGroupRequest { name: name.into(), description: None },
                )
                .await
                .unwrap();
        }
    }

    fn request(group: &str) -> CustomerRequest {
        CustomerRequest {
            name: "Le Van C".into(),
            email: Some("c@mail.vn".into()),
            phone_number: Some("0987654321".into()),
            customer_group: group.into(),
            ..Default::default()
        }
    }

    fn image() -> UploadedFile {
        UploadedFile { file_name: "face.jpg".into(), bytes: vec![0xFF, 0xD8, 0xFF] }
    }

    #[tokio::test]
    async fn create_resolves_group_and_projects_names() {
        let fixture = Fixture::new().await;
        seed_groups(&fixture).await;
        let service = CustomerService::new(&fixture.repos, fixture.file_storage());

        let created = service
            .create(&fixture.owner, request("VIP"), Some(image()))
            .await
            .unwrap();

        assert_eq!(created.customer_group, "VIP");
        assert_eq!(created.creator.as_deref(), Some(fixture.owner.name.as_str()));
        assert!(created.image.unwrap().ends_with("_face.jpg"));
        assert_eq!(service.get_all(&fixture.owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_group_is_not_found() {
        let fixture = Fixture::new().await;
        let service = CustomerService::new(&fixture.repos, fixture.file_storage());

        let result = service.create(&fixture.owner, request("Ghost"), None).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(service.get_all(&fixture.owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_moves_group_and_keeps_image_without_file() {
        let fixture = Fixture::new().await;
        seed_groups(&fixture).await;
        let service = CustomerService::new(&fixture.repos, fixture.file_storage());
        let created = service
            .create(&fixture.owner, request("VIP"), Some(image()))
            .await
            .unwrap();

        let mut changes = request("Wholesale");
        changes.status = Some("inactive".into());
        let updated = service.update(created.id, changes, None).await.unwrap();

        assert_eq!(updated.customer_group, "Wholesale");
        assert_eq!(updated.status.as_deref(), Some("inactive"));
        assert_eq!(updated.image, created.image);

        let missing = service.update(Uuid::new_v4(), request("VIP"), None).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_customer() {
        let fixture = Fixture::new().await;
        seed_groups(&fixture).await;
        let service = CustomerService::new(&fixture.repos, fixture.file_storage());
        let created = service.create(&fixture.owner, request("VIP"), None).await.unwrap();

        service.delete(created.id).await.unwrap();

        assert!(matches!(service.get_by_id(created.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete(created.id).await, Err(AppError::NotFound(_))));
    }
}
