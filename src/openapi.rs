use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::Modify;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "WIO Tracker API",
        version = "0.1.0",
        description = "Backend API for tracking hybrid-work attendance, leave and overtime"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // Health
        crate::handlers::health::health_check,

        // Calendar
        crate::handlers::calendar_handler::get_month,
        crate::handlers::calendar_handler::get_records,
        crate::handlers::calendar_handler::set_status,
        crate::handlers::calendar_handler::cycle_status,
        crate::handlers::calendar_handler::apply_legend,
        crate::handlers::calendar_handler::check_in,
        crate::handlers::calendar_handler::set_overtime,

        // Summary
        crate::handlers::summary_handler::get_summary,

        // Settings
        crate::handlers::settings_handler::get_settings,
        crate::handlers::settings_handler::update_settings,

        // Holidays
        crate::handlers::holidays_handler::get_holidays,

        // Schedules
        crate::handlers::schedules_handler::get_schedules,
        crate::handlers::schedules_handler::create_schedule,
        crate::handlers::schedules_handler::update_schedule,
        crate::handlers::schedules_handler::delete_schedule,

        // Admin
        crate::handlers::admin_handler::get_growth,
    ),
    components(
        schemas(
            // Attendance
            crate::attendance::StatusKey,
            crate::attendance::DayStatus,
            crate::attendance::Legend,
            crate::attendance::CalendarDay,
            crate::attendance::MonthSummary,
            crate::attendance::WioBreakdown,
            crate::attendance::LeaveUsage,
            crate::attendance::OvertimeTotals,

            // Models
            crate::models::CalendarRecord,
            crate::models::Holiday,
            crate::models::UserSettings,
            crate::models::Language,
            crate::models::Schedule,
            crate::models::GrowthPoint,
            crate::models::GrowthResponse,

            // Input models
            crate::models::ApplyLegendInput,
            crate::models::CheckInInput,
            crate::models::CheckInMode,
            crate::models::OvertimeInput,
            crate::models::OvertimeResponse,
            crate::models::UpdateSettingsInput,
            crate::models::CreateScheduleInput,
            crate::models::UpdateScheduleInput,
            crate::models::ScheduleMutationResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "calendar", description = "Daily attendance status and overtime"),
        (name = "summary", description = "WIO, leave and overtime figures"),
        (name = "settings", description = "Per-user targets, quotas and country"),
        (name = "holidays", description = "Public holidays by country"),
        (name = "schedules", description = "Per-day to-do items"),
        (name = "admin", description = "Admin reports"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("sb-access-token"))),
            );
        }
    }
}
