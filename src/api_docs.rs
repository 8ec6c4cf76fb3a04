use crate::api;
use crate::domain::MemberTeamDto;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::member::search_member_v1,
        api::member::search_member_v2,
    ),
    components(schemas(MemberTeamDto)),
    tags(
        (name = "member-search", description = "Member search API")
    )
)]
pub struct ApiDoc;
