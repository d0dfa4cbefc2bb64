use serde::Serialize;

/// Successful result of a service operation, tagged with what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Ok(T),
    Created(T),
    Updated(T),
    Deleted(T),
}

impl<T> Outcome<T> {
    /// HTTP status for this outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            Outcome::Created(_) => 201,
            Outcome::Ok(_) | Outcome::Updated(_) | Outcome::Deleted(_) => 200,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Ok(_) => "OK",
            Outcome::Created(_) => "Created",
            Outcome::Updated(_) => "Updated",
            Outcome::Deleted(_) => "Deleted",
        }
    }

    pub fn data(&self) -> &T {
        match self {
            Outcome::Ok(data)
            | Outcome::Created(data)
            | Outcome::Updated(data)
            | Outcome::Deleted(data) => data,
        }
    }

    pub fn into_data(self) -> T {
        match self {
            Outcome::Ok(data)
            | Outcome::Created(data)
            | Outcome::Updated(data)
            | Outcome::Deleted(data) => data,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Ok(data) => Outcome::Ok(f(data)),
            Outcome::Created(data) => Outcome::Created(f(data)),
            Outcome::Updated(data) => Outcome::Updated(f(data)),
            Outcome::Deleted(data) => Outcome::Deleted(f(data)),
        }
    }
}

/// JSON body of a successful response.
#[derive(Debug, Serialize)]
pub struct SuccessBody<'a, T> {
    pub message: &'static str,
    pub data: &'a T,
}

impl<T: Serialize> Outcome<T> {
    pub fn body(&self) -> SuccessBody<'_, T> {
        SuccessBody {
            message: self.message(),
            data: self.data(),
        }
    }
}
