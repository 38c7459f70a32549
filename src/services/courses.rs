use crate::{
    db::{CourseRecord, Directory},
    domain::UserId,
    services::ServiceError,
};

#[tracing::instrument(name = "services::courses_for_account", skip(directory))]
pub async fn courses_for_account(
    user_id: UserId,
    directory: &dyn Directory,
) -> Result<Vec<CourseRecord>, ServiceError> {
    let courses = directory.courses_for_user(user_id).await?;

    Ok(courses)
}
