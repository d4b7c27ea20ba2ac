use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::calendar::requests::{CalendarQueryParams, CreateCalendarEventRequest};
use crate::models::users::entities::UserRole;
use crate::services::CalendarService;
use crate::utils::SafeEventId;

static CALENDAR_SERVICE: Lazy<CalendarService> = Lazy::new(CalendarService::new_lazy);

pub async fn list_events(
    req: HttpRequest,
    query: web::Query<CalendarQueryParams>,
) -> ActixResult<HttpResponse> {
    CALENDAR_SERVICE.list_events(&req, query.into_inner()).await
}

pub async fn create_event(
    req: HttpRequest,
    body: web::Json<CreateCalendarEventRequest>,
) -> ActixResult<HttpResponse> {
    CALENDAR_SERVICE.create_event(&req, body.into_inner()).await
}

pub async fn delete_event(req: HttpRequest, path: SafeEventId) -> ActixResult<HttpResponse> {
    CALENDAR_SERVICE.delete_event(&req, path.0).await
}

pub fn configure_calendar_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/calendar")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/events")
                    .route(web::get().to(list_events))
                    .route(
                        web::post()
                            .to(create_event)
                            .wrap(middlewares::RequireRole::new(&UserRole::Professor)),
                    ),
            )
            .route(
                "/events/{event_id}",
                web::delete()
                    .to(delete_event)
                    .wrap(middlewares::RequireRole::new(&UserRole::Professor)),
            ),
    );
}
