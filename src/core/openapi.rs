use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::chat::{dtos as chat_dtos, handlers as chat_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::laporan::{
    dtos as laporan_dtos, handlers as laporan_handlers, models as laporan_models,
};
use crate::features::program::{
    dtos as program_dtos, handlers as program_handlers, models as program_models,
};
use crate::features::transactions::{
    dtos as transactions_dtos, handlers as transactions_handlers, models as transactions_models,
};
use crate::features::umkm::{dtos as umkm_dtos, handlers as umkm_handlers, models as umkm_models};
use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::features::users::{
    dtos as users_dtos, handlers as users_handlers, models as users_models,
};
use crate::features::wisata::{
    dtos as wisata_dtos, handlers as wisata_handlers, models as wisata_models,
};
use crate::modules::weather::CurrentWeather;
use crate::shared::chat::{CardField, PlaceCard, RenderedMessage};
use crate::shared::types::{ApiResponse, ErrorKind, Meta, PaginationMeta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::register,
        auth_handlers::login,
        auth_handlers::logout,
        auth_handlers::get_me,
        // Users (admin)
        users_handlers::list_users,
        users_handlers::get_user,
        users_handlers::create_user,
        users_handlers::update_user,
        users_handlers::delete_user,
        // Laporan
        laporan_handlers::list_laporan,
        laporan_handlers::laporan_stats,
        laporan_handlers::my_laporan,
        laporan_handlers::get_laporan,
        laporan_handlers::create_laporan,
        laporan_handlers::update_laporan,
        laporan_handlers::update_laporan_status,
        laporan_handlers::delete_laporan,
        // Program pembangunan
        program_handlers::list_program,
        program_handlers::get_program,
        program_handlers::create_program,
        program_handlers::update_program,
        program_handlers::delete_program,
        // Wisata
        wisata_handlers::list_wisata,
        wisata_handlers::get_wisata,
        wisata_handlers::create_wisata,
        wisata_handlers::update_wisata,
        wisata_handlers::delete_wisata,
        wisata_handlers::resolve_coordinates,
        // UMKM
        umkm_handlers::list_umkm,
        umkm_handlers::get_umkm_by_slug,
        umkm_handlers::get_umkm,
        umkm_handlers::create_umkm,
        umkm_handlers::update_umkm,
        umkm_handlers::delete_umkm,
        // Transactions
        transactions_handlers::purchase_ticket,
        transactions_handlers::list_transactions,
        transactions_handlers::my_transactions,
        transactions_handlers::get_transaction,
        transactions_handlers::payment_status,
        transactions_handlers::payment_countdown,
        // Chat
        chat_handlers::chat,
        // Uploads
        uploads_handlers::upload_image,
        // Home & dashboard
        dashboard_handlers::get_home,
        dashboard_handlers::get_admin_dashboard,
    ),
    components(
        schemas(
            // Shared
            Meta,
            PaginationMeta,
            ErrorKind,
            // Auth
            auth_dtos::RegisterRequestDto,
            auth_dtos::LoginRequestDto,
            auth_dtos::SessionDto,
            auth_dtos::RegisterResponseDto,
            ApiResponse<auth_dtos::SessionDto>,
            ApiResponse<auth_dtos::RegisterResponseDto>,
            // Users
            users_models::User,
            users_models::UserRole,
            users_dtos::CreateUserDto,
            users_dtos::UpdateUserDto,
            ApiResponse<users_models::User>,
            ApiResponse<Vec<users_models::User>>,
            // Laporan
            laporan_models::Laporan,
            laporan_models::LaporanStatus,
            laporan_models::LaporanStats,
            laporan_models::Pelapor,
            laporan_dtos::CreateLaporanDto,
            laporan_dtos::UpdateLaporanDto,
            laporan_dtos::UpdateLaporanStatusDto,
            ApiResponse<laporan_models::Laporan>,
            ApiResponse<Vec<laporan_models::Laporan>>,
            ApiResponse<laporan_models::LaporanStats>,
            // Program
            program_models::Program,
            program_dtos::CreateProgramDto,
            program_dtos::UpdateProgramDto,
            ApiResponse<program_models::Program>,
            ApiResponse<Vec<program_models::Program>>,
            // Wisata
            wisata_models::Wisata,
            wisata_dtos::CreateWisataDto,
            wisata_dtos::UpdateWisataDto,
            wisata_dtos::ResolveCoordinatesDto,
            wisata_dtos::CoordinatesResponseDto,
            ApiResponse<wisata_models::Wisata>,
            ApiResponse<Vec<wisata_models::Wisata>>,
            ApiResponse<wisata_dtos::CoordinatesResponseDto>,
            // UMKM
            umkm_models::Umkm,
            umkm_dtos::CreateUmkmDto,
            umkm_dtos::UpdateUmkmDto,
            umkm_dtos::UmkmDetailDto,
            ApiResponse<umkm_models::Umkm>,
            ApiResponse<Vec<umkm_models::Umkm>>,
            ApiResponse<umkm_dtos::UmkmDetailDto>,
            // Transactions
            transactions_models::Transaction,
            transactions_models::TransactionStatus,
            transactions_dtos::PurchaseTicketDto,
            transactions_dtos::PaymentStatusView,
            transactions_dtos::PaymentInstructions,
            transactions_dtos::TicketRedirect,
            ApiResponse<transactions_models::Transaction>,
            ApiResponse<Vec<transactions_models::Transaction>>,
            ApiResponse<transactions_dtos::PaymentStatusView>,
            // Chat
            chat_dtos::ChatRequestDto,
            chat_dtos::ChatTurn,
            chat_dtos::ChatRole,
            chat_dtos::ChatResponseDto,
            RenderedMessage,
            PlaceCard,
            CardField,
            ApiResponse<chat_dtos::ChatResponseDto>,
            // Uploads
            uploads_dtos::UploadImageDto,
            uploads_dtos::UploadResponseDto,
            ApiResponse<uploads_dtos::UploadResponseDto>,
            // Home & dashboard
            CurrentWeather,
            dashboard_dtos::PopulationStats,
            dashboard_dtos::HomeDto,
            dashboard_dtos::EntityCounts,
            dashboard_dtos::AdminDashboardDto,
            ApiResponse<dashboard_dtos::HomeDto>,
            ApiResponse<dashboard_dtos::AdminDashboardDto>,
        )
    ),
    tags(
        (name = "auth", description = "Register, login and session"),
        (name = "users", description = "User management (admin only)"),
        (name = "laporan", description = "Citizen complaints"),
        (name = "program", description = "Village development programs"),
        (name = "wisata", description = "Tourism destinations"),
        (name = "umkm", description = "Local business directory"),
        (name = "transactions", description = "Ticket orders and payment status"),
        (name = "chat", description = "Village assistant chatbot"),
        (name = "uploads", description = "Image uploads"),
        (name = "Dashboard", description = "Home page and admin dashboard"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Desa Portal API",
        version = "0.1.0",
        description = "API documentation for the village information portal",
    )
)]
pub struct ApiDoc;

/// Adds the session bearer security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
