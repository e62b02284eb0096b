use thiserror::Error;
use tonic::Status;

use crate::domain::auth::errors::PasswordInputError;
use crate::domain::auth::errors::UsernameError;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::Password;
use crate::domain::auth::models::Username;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<S>(service: &S, request: LoginRequest) -> Result<LoginResponse, Status>
where
    S: AuthServicePort + ?Sized,
{
    let credentials = Credentials::try_from(request)?;

    let token = service.login(credentials).await?;

    Ok(LoginResponse {
        token: token.into_string(),
    })
}

#[derive(Debug, Clone, Error)]
pub enum ParseLoginRequestError {
    #[error(transparent)]
    Username(#[from] UsernameError),

    #[error(transparent)]
    Password(#[from] PasswordInputError),
}

impl TryFrom<LoginRequest> for Credentials {
    type Error = ParseLoginRequestError;

    fn try_from(request: LoginRequest) -> Result<Self, Self::Error> {
        let username = Username::new(request.username)?;
        let password = Password::new(request.password)?;
        Ok(Credentials::new(username, password))
    }
}

impl From<ParseLoginRequestError> for Status {
    fn from(err: ParseLoginRequestError) -> Self {
        Status::invalid_argument(err.to_string())
    }
}
