use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{ApiResponse, LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{conflict_error, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    repository: UserRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt_config,
        }
    }

    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        // Validar campos
        request.validate().map_err(AppError::Validation)?;

        // Verificar que el email no exista
        if self.repository.email_exists(&request.email).await? {
            return Err(conflict_error("User", "email", &request.email));
        }

        // Hash de la contraseña
        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        // Crear usuario
        let user = User::new(request.email, request.full_name, password_hash);
        let saved_user = self.repository.create(&user).await?;

        Ok(ApiResponse::success_with_message(
            UserResponse::from(saved_user),
            "Usuario registrado exitosamente".to_string(),
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        // Buscar usuario por email
        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        // Verificar contraseña
        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        // Generar JWT token
        let token = generate_token(user.id, &self.jwt_config)?;

        Ok(LoginResponse::success(
            token,
            user.id.to_string(),
            user.full_name,
        ))
    }

    pub async fn me(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(user))
    }
}
