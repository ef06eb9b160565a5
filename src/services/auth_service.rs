use std::sync::Arc;

use crate::errors::AppError;
use crate::models::role::{Role, StaffRole};
use crate::models::staff::{Caller, Staff, StaffAssignment, StaffProfile};
use crate::models::store::Store;
use crate::payload::auth::{AuthRequest, AuthResponse};
use crate::repositories::{Repositories, StaffRepository, StaffRoleRepository, StoreRepository};
use crate::services::staff_service::StaffService;
use crate::utils::jwt::{generate_token, validate_token};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validation::validate_payload;

#[derive(Clone)]
pub struct AuthService {
    stores: Arc<dyn StoreRepository>,
    staffs: Arc<dyn StaffRepository>,
    roles: Arc<dyn StaffRoleRepository>,
    staff_service: StaffService,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(repos: &Repositories, staff_service: StaffService, jwt_secret: String) -> Self {
        Self {
            stores: repos.stores.clone(),
            staffs: repos.staffs.clone(),
            roles: repos.roles.clone(),
            staff_service,
            jwt_secret,
        }
    }

    /// Dispatches on `action`: `create` registers a new store, `login` signs in.
    pub async fn authenticate_request(&self, request: AuthRequest) -> Result<AuthResponse, AppError> {
        validate_payload(&request)?;
        match request.action.to_lowercase().as_str() {
            "create" => self.register(request).await,
            "login" => self.login(request).await,
            _ => Err(AppError::BadRequest("Invalid action".to_string())),
        }
    }

    /// Opens a new store with its roles and an owner account.
    pub async fn register(&self, request: AuthRequest) -> Result<AuthResponse, AppError> {
        if self.staffs.exists_by_email(&request.email).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }
        let store_name = request
            .store_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("Store name is required".to_string()))?;

        let store = Store::new(store_name);
        self.stores.save(&store).await?;

        let mut owner_role = None;
        for role in Role::ALL {
            let row = StaffRole::new(role.as_str(), store.store_id);
            self.roles.save(&row).await?;
            if role == Role::Owner {
                owner_role = Some(row.role_id);
            }
        }

        let name = request
            .name
            .unwrap_or_else(|| request.email.split('@').next().unwrap_or_default().to_string());
        let owner = Staff::new(
            StaffProfile {
                name,
                email: request.email.clone(),
                ..Default::default()
            },
            hash_password(&request.password)?,
            StaffAssignment {
                role_id: owner_role,
                position_id: None,
            },
            None,
            store.store_id,
        );
        self.staffs.save(&owner).await?;
        log::info!("Store {} registered by {}", store.store_id, owner.email);

        Ok(AuthResponse {
            token: self.issue_token(&owner.email)?,
            email: owner.email,
        })
    }

    pub async fn login(&self, request: AuthRequest) -> Result<AuthResponse, AppError> {
        let staff = self
            .staffs
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        if !verify_password(&request.password, &staff.password)? {
            return Err(AppError::Unauthorized("Invalid email or password".to_string()));
        }

        Ok(AuthResponse {
            token: self.issue_token(&staff.email)?,
            email: staff.email,
        })
    }

    /// Resolves a bearer token to the staff member it was issued for.
    pub async fn authenticate(&self, token: &str) -> Result<Caller, AppError> {
        let claims = validate_token(token, &self.jwt_secret)
            .map_err(|err| AppError::Unauthorized(format!("Invalid token: {}", err)))?;

        match self.staff_service.get_authorized_staff(&claims.sub).await {
            Err(AppError::NotFound(_)) => Err(AppError::Unauthorized("Your user not found".to_string())),
            other => other,
        }
    }

    fn issue_token(&self, email: &str) -> Result<String, AppError> {
        generate_token(email, &self.jwt_secret)
            .map_err(|_| AppError::InternalServerError("Token generation error".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::InMemoryDatabase;
    use crate::storage::InMemoryFileStorage;

    fn service() -> AuthService {
        let repos = Repositories::in_memory(Arc::new(InMemoryDatabase::new()));
        let staff_service = StaffService::new(&repos, Arc::new(InMemoryFileStorage::new("test-bucket")));
        AuthService::new(&repos, staff_service, "test-secret".into())
    }

    fn request(action: &str, email: &str, password: &str) -> AuthRequest {
        AuthRequest {
            email: email.into(),
            password: password.into(),
            action: action.into(),
            name: Some("Pham Thi D".into()),
            store_name: Some("Tiem Tap Hoa".into()),
        }
    }

    #[tokio::test]
    async fn register_creates_an_owner_who_can_sign_in() {
        let service = service();

        let registered = service
            .authenticate_request(request("create", "d@shop.vn", "secret12"))
            .await
            .unwrap();
        let caller = service.authenticate(&registered.token).await.unwrap();
        assert_eq!(caller.email, "d@shop.vn");
        assert_eq!(caller.name, "Pham Thi D");
        assert!(caller.has_role(Role::Owner));

        let logged_in = service
            .authenticate_request(request("login", "d@shop.vn", "secret12"))
            .await
            .unwrap();
        assert_eq!(service.authenticate(&logged_in.token).await.unwrap(), caller);
    }

    #[tokio::test]
    async fn register_rejects_taken_email_and_missing_store() {
        let service = service();
        service
            .authenticate_request(request("create", "d@shop.vn", "secret12"))
            .await
            .unwrap();

        assert!(matches!(
            service.authenticate_request(request("create", "d@shop.vn", "secret12")).await,
            Err(AppError::Conflict(_))
        ));

        let mut storeless = request("create", "e@shop.vn", "secret12");
        storeless.store_name = None;
        assert!(matches!(
            service.authenticate_request(storeless).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn bad_credentials_are_unauthorized() {
        let service = service();
        service
            .authenticate_request(request("create", "d@shop.vn", "secret12"))
            .await
            .unwrap();

        assert!(matches!(
            service.authenticate_request(request("login", "d@shop.vn", "wrong-pass")).await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            service.authenticate_request(request("login", "x@shop.vn", "secret12")).await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            service.authenticate_request(request("reset", "d@shop.vn", "secret12")).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn tokens_for_unknown_staff_are_unauthorized() {
        let service = service();
        let token = generate_token("ghost@shop.vn", "test-secret").unwrap();

        assert!(matches!(service.authenticate(&token).await, Err(AppError::Unauthorized(_))));
        assert!(matches!(service.authenticate("garbage").await, Err(AppError::Unauthorized(_))));
    }
}
