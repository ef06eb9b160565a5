use std::sync::Arc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::activity_log::ActivityAction;
use crate::models::customer_group::CustomerGroup;
use crate::models::staff::Caller;
use crate::payload::customer_group::{CustomerGroupRequest, CustomerGroupResponse};
use crate::repositories::{CustomerGroupRepository, CustomerRepository, Repositories};
use crate::services::activity_log_service::ActivityLogService;
use crate::utils::validation::validate_payload;

#[derive(Clone)]
pub struct CustomerGroupService {
    groups: Arc<dyn CustomerGroupRepository>,
    customers: Arc<dyn CustomerRepository>,
    activity_logs: ActivityLogService,
}

impl CustomerGroupService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            groups: repos.customer_groups.clone(),
            customers: repos.customers.clone(),
            activity_logs: ActivityLogService::new(repos.activity_logs.clone()),
        }
    }

    pub async fn create(
        &self,
        caller: &Caller,
        request: CustomerGroupRequest,
    ) -> Result<CustomerGroupResponse, AppError> {
        validate_payload(&request)?;

        if self
            .groups
            .find_by_name_and_store_id(&request.name, caller.store_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Customer group name already exists".to_string()));
        }

        let group = CustomerGroup::new(
            request.name,
            request.description,
            Some(caller.staff_id),
            caller.store_id,
        );
        self.groups.save(&group).await?;
        self.activity_logs
            .save(ActivityAction::Create, "Create new customer group", caller)
            .await?;

        self.to_response(group).await
    }

    pub async fn update(
        &self,
        caller: &Caller,
        id: Uuid,
        request: CustomerGroupRequest,
    ) -> Result<CustomerGroupResponse, AppError> {
        validate_payload(&request)?;
        let mut group = self.find_group(id).await?;

        let clash = self
            .groups
            .find_by_name_and_store_id(&request.name, group.store_id)
            .await?;
        if clash.is_some_and(|other| other.group_id != group.group_id) {
            return Err(AppError::Conflict("Customer group name already exists".to_string()));
        }

        group.name = request.name;
        group.description = request.description;
        self.groups.save(&group).await?;
        self.activity_logs
            .save(ActivityAction::Update, format!("Update customer group with id {}", id), caller)
            .await?;

        self.to_response(group).await
    }

    pub async fn get_all(&self, caller: &Caller) -> Result<Vec<CustomerGroupResponse>, AppError> {
        let groups = self.groups.find_by_store_id(caller.store_id).await?;
        let mut responses = Vec::with_capacity(groups.len());
        for group in groups {
            responses.push(self.to_response(group).await?);
        }
        Ok(responses)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CustomerGroupResponse, AppError> {
        let group = self.find_group(id).await?;
        self.to_response(group).await
    }

    pub async fn delete(&self, caller: &Caller, id: Uuid) -> Result<(), AppError> {
        let group = self.find_group(id).await?;

        let members = self.customers.find_ids_by_group_id(group.group_id).await?;
        if !members.is_empty() {
            return Err(AppError::Conflict(
                "Cannot delete customer group with assigned customers".to_string(),
            ));
        }

        self.groups.delete(group.group_id).await?;
        self.activity_logs
            .save(ActivityAction::Delete, format!("Delete customer group with id {}", id), caller)
            .await?;
        Ok(())
    }

    async fn find_group(&self, id: Uuid) -> Result<CustomerGroup, AppError> {
        self.groups
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer group with id {} not found", id)))
    }

    async fn to_response(&self, group: CustomerGroup) -> Result<CustomerGroupResponse, AppError> {
        Ok(CustomerGroupResponse {
            customer_ids: self.customers.find_ids_by_group_id(group.group_id).await?,
            id: group.group_id,
            name: group.name,
            description: group.description,
            creator: group.creator_id,
            created_at: group.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::{Customer, CustomerDetails};
    use crate::services::test_support::Fixture;

    fn request(name: &str) -> CustomerGroupRequest {
        CustomerGroupRequest {
            name: name.into(),
            description: Some("regulars".into()),
        }
    }

    #[tokio::test]
    async fn create_stamps_creator_and_rejects_duplicate_names() {
        let fixture = Fixture::new().await;
        let service = CustomerGroupService::new(&fixture.repos);

        let created = service.create(&fixture.owner, request("VIP")).await.unwrap();
        assert_eq!(created.creator, Some(fixture.owner.staff_id));
        assert!(created.customer_ids.is_empty());

        let duplicate = service.create(&fixture.owner, request("VIP")).await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn same_name_in_another_store_is_allowed() {
        let fixture = Fixture::new().await;
        let service = CustomerGroupService::new(&fixture.repos);
        let mut elsewhere = fixture.owner.clone();
        elsewhere.store_id = Uuid::new_v4();

        service.create(&fixture.owner, request("VIP")).await.unwrap();
        assert!(service.create(&elsewhere, request("VIP")).await.is_ok());
        assert_eq!(service.get_all(&fixture.owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn renaming_to_own_name_succeeds() {
        let fixture = Fixture::new().await;
        let service = CustomerGroupService::new(&fixture.repos);
        let created = service.create(&fixture.owner, request("VIP")).await.unwrap();

        let mut same = request("VIP");
        same.description = Some("top spenders".into());
        let updated = service.update(&fixture.owner, created.id, same).await.unwrap();

        assert_eq!(updated.name, "VIP");
        assert_eq!(updated.description.as_deref(), Some("top spenders"));
    }

    #[tokio::test]
    async fn renaming_onto_another_group_conflicts() {
        let fixture = Fixture::new().await;
        let service = CustomerGroupService::new(&fixture.repos);
        service.create(&fixture.owner, request("VIP")).await.unwrap();
        let wholesale = service.create(&fixture.owner, request("Wholesale")).await.unwrap();

        let result = service.update(&fixture.owner, wholesale.id, request("VIP")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let missing = service.update(&fixture.owner, Uuid::new_v4(), request("New")).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_refuses_groups_with_members() {
        let fixture = Fixture::new().await;
        let service = CustomerGroupService::new(&fixture.repos);
        let group = service.create(&fixture.owner, request("VIP")).await.unwrap();
        let customer = Customer::new(
            CustomerDetails { name: "Tran Thi B".into(), ..Default::default() },
            group.id,
            Some(fixture.owner.staff_id),
            fixture.store_id,
        );
        fixture.repos.customers.save(&customer).await.unwrap();

        let fetched = service.get_by_id(group.id).await.unwrap();
        assert_eq!(fetched.customer_ids, vec![customer.customer_id]);
        assert!(matches!(
            service.delete(&fixture.owner, group.id).await,
            Err(AppError::Conflict(_))
        ));

        fixture.repos.customers.delete(customer.customer_id).await.unwrap();
        service.delete(&fixture.owner, group.id).await.unwrap();
        assert!(matches!(service.get_by_id(group.id).await, Err(AppError::NotFound(_))));
    }
}
