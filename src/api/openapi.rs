//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, libraries, library_books};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "1.0.0",
        description = "Library Catalog Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Libris Team")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Libraries
        libraries::list_libraries,
        libraries::get_library,
        libraries::create_library,
        libraries::update_library,
        libraries::delete_library,
        libraries::get_library_books,
        libraries::recount_library,
        libraries::get_library_stats,
        // Books
        books::list_books,
        books::get_book,
        books::get_book_by_isbn,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::get_book_libraries,
        books::list_categories,
        books::list_authors,
        // Library-book mappings
        library_books::list_library_books,
        library_books::get_library_book,
        library_books::get_library_book_details,
        library_books::create_library_book,
        library_books::update_library_book,
        library_books::delete_library_book,
    ),
    components(
        schemas(
            // Enums
            crate::models::enums::EntityStatus,
            // Libraries
            crate::models::library::Library,
            crate::models::library::CreateLibrary,
            crate::models::library::UpdateLibrary,
            crate::models::library::LibraryListResponse,
            crate::models::library::LibraryStats,
            crate::models::library::LibraryForBook,
            crate::models::library::LibrariesForBookResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book::BookListResponse,
            crate::models::book::BookInLibrary,
            crate::models::book::BooksInLibraryResponse,
            // Library-book mappings
            crate::models::library_book::LibraryBook,
            crate::models::library_book::CreateLibraryBook,
            crate::models::library_book::UpdateLibraryBook,
            crate::models::library_book::LibraryBookDetails,
            crate::models::library_book::LibraryBookListResponse,
            crate::models::library_book::LibraryBookFull,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
            crate::error::FieldError,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "libraries", description = "Library management"),
        (name = "books", description = "Book catalog management"),
        (name = "library-books", description = "Library-book mapping management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
