use super::Clinic;
use crate::view::{Page, View};
use crate::{ClinicError, Result};

pub async fn welcome(_clinic: &Clinic) -> Result<View> {
    Ok(View::Page(Page::Welcome))
}

/// Always fails; shows what an unexpected error looks like to the user
pub async fn crash(_clinic: &Clinic) -> Result<View> {
    Err(ClinicError::Internal(
        "Expected: handler used to showcase what happens when an error is raised".into(),
    ))
}
