use actix_session::Session;
use actix_web::HttpResponse;

use crate::errors::{render, AppError};
use crate::templates_structs::{HomeTemplate, PageContext};

pub async fn index(session: Session) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, "/");
    render(HomeTemplate { ctx })
}
