use thiserror::Error;
use tonic::Status;

use crate::domain::auth::errors::DisplayNameError;
use crate::domain::auth::errors::PasswordInputError;
use crate::domain::auth::errors::UsernameError;
use crate::domain::auth::models::DisplayName;
use crate::domain::auth::models::Password;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::Username;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register_new_user<S>(
    service: &S,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status>
where
    S: AuthServicePort + ?Sized,
{
    let command = RegisterUserCommand::try_from(request)?;

    let user_id = service.register_new_user(command).await?;

    Ok(RegisterResponse {
        user_id: user_id.value(),
    })
}

#[derive(Debug, Clone, Error)]
pub enum ParseRegisterRequestError {
    #[error(transparent)]
    Name(#[from] DisplayNameError),

    #[error(transparent)]
    Username(#[from] UsernameError),

    #[error(transparent)]
    Password(#[from] PasswordInputError),
}

impl TryFrom<RegisterRequest> for RegisterUserCommand {
    type Error = ParseRegisterRequestError;

    fn try_from(request: RegisterRequest) -> Result<Self, Self::Error> {
        let name = DisplayName::new(request.name)?;
        let username = Username::new(request.username)?;
        let password = Password::new(request.password)?;
        Ok(RegisterUserCommand::new(name, username, password))
    }
}

impl From<ParseRegisterRequestError> for Status {
    fn from(err: ParseRegisterRequestError) -> Self {
        Status::invalid_argument(err.to_string())
    }
}
