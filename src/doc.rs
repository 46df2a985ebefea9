//! OpenAPI document for the registration API, served at `/api-docs/openapi.json`.

use crate::handlers::EnrollRequest;
use crate::model::{Course, EnrollmentRecord};
use crate::response::MetaCount;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course registry API",
        description = "List the course catalog, list enrollments, and enroll students."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::handlers::courses::list_courses,
        crate::handlers::enrollments::list_enrollments,
        crate::handlers::enrollments::enroll,
        crate::routes::common::health,
        crate::routes::common::ready,
    ),
    components(schemas(Course, EnrollmentRecord, EnrollRequest, MetaCount)),
    tags(
        (name = "courses", description = "Course catalog"),
        (name = "enrollments", description = "Student enrollments"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
