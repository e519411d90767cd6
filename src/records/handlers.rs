use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::validate_request_token;
use crate::records::models::{AddressRecord, EmailRecord, PayerRecord, ReceiverRecord};
use crate::records::store::Party;
use crate::{AppState, ErrorResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateContactRequest {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAddressRequest {
    pub address: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CombinedPayersResponse {
    pub payers: Vec<PayerRecord>,
    pub addresses: Vec<AddressRecord>,
    pub emails: Vec<EmailRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CombinedReceiversResponse {
    pub receivers: Vec<ReceiverRecord>,
    pub addresses: Vec<AddressRecord>,
    pub emails: Vec<EmailRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedPayerResponse {
    pub payer: PayerRecord,
    pub address: Option<AddressRecord>,
    pub email: Option<EmailRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedReceiverResponse {
    pub receiver: ReceiverRecord,
    pub address: Option<AddressRecord>,
    pub email: Option<EmailRecord>,
}

fn authorized_user(req: &HttpRequest) -> Result<String, HttpResponse> {
    match validate_request_token(req) {
        Ok(claims) => Ok(claims.sub),
        Err(_) => Err(HttpResponse::Unauthorized()
            .json(ErrorResponse::unauthorized("Missing or invalid session token"))),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Records",
    get,
    path = "/payers-combined",
    responses(
        (status = 200, description = "All payer records for the current user", body = CombinedPayersResponse),
        (status = 401, description = "Missing or invalid session token", body = ErrorResponse)
    )
)]
pub async fn get_payers_combined(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    let user_id = match authorized_user(&req) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };

    HttpResponse::Ok().json(CombinedPayersResponse {
        payers: state.records.payers_for(&user_id),
        addresses: state.records.addresses_for(Party::Payer, &user_id),
        emails: state.records.emails_for(Party::Payer, &user_id),
    })
}

#[utoipa::path(
    context_path = "/api",
    tag = "Records",
    post,
    path = "/payers-combined",
    request_body = CreateContactRequest,
    responses(
        (status = 200, description = "Payer created", body = CreatedPayerResponse),
        (status = 400, description = "Name missing", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session token", body = ErrorResponse)
    )
)]
pub async fn create_payer_combined(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CreateContactRequest>,
) -> impl Responder {
    let user_id = match authorized_user(&req) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    if body.name.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request("Name is required"));
    }

    let payer = state.records.create_payer(&user_id, body.name.trim());
    let address = body
        .address
        .as_deref()
        .filter(|a| !a.trim().is_empty())
        .map(|a| state.records.create_address(Party::Payer, &user_id, a));
    let email = body
        .email
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .map(|e| state.records.create_email(Party::Payer, &user_id, e));

    HttpResponse::Ok().json(CreatedPayerResponse {
        payer,
        address,
        email,
    })
}

#[utoipa::path(
    context_path = "/api",
    tag = "Records",
    get,
    path = "/receivers-combined",
    responses(
        (status = 200, description = "All receiver records for the current user", body = CombinedReceiversResponse),
        (status = 401, description = "Missing or invalid session token", body = ErrorResponse)
    )
)]
pub async fn get_receivers_combined(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> impl Responder {
    let user_id = match authorized_user(&req) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };

    HttpResponse::Ok().json(CombinedReceiversResponse {
        receivers: state.records.receivers_for(&user_id),
        addresses: state.records.addresses_for(Party::Receiver, &user_id),
        emails: state.records.emails_for(Party::Receiver, &user_id),
    })
}

#[utoipa::path(
    context_path = "/api",
    tag = "Records",
    post,
    path = "/receivers-combined",
    request_body = CreateContactRequest,
    responses(
        (status = 200, description = "Receiver created", body = CreatedReceiverResponse),
        (status = 400, description = "Name missing", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session token", body = ErrorResponse)
    )
)]
pub async fn create_receiver_combined(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CreateContactRequest>,
) -> impl Responder {
    let user_id = match authorized_user(&req) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    if body.name.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request("Name is required"));
    }

    let receiver = state.records.create_receiver(&user_id, body.name.trim());
    let address = body
        .address
        .as_deref()
        .filter(|a| !a.trim().is_empty())
        .map(|a| state.records.create_address(Party::Receiver, &user_id, a));
    let email = body
        .email
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .map(|e| state.records.create_email(Party::Receiver, &user_id, e));

    HttpResponse::Ok().json(CreatedReceiverResponse {
        receiver,
        address,
        email,
    })
}

#[utoipa::path(
    context_path = "/api",
    tag = "Records",
    get,
    path = "/payer-addresses",
    responses(
        (status = 200, description = "Payer addresses for the current user", body = [AddressRecord]),
        (status = 401, description = "Missing or invalid session token", body = ErrorResponse)
    )
)]
pub async fn get_payer_addresses(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    let user_id = match authorized_user(&req) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    HttpResponse::Ok().json(state.records.addresses_for(Party::Payer, &user_id))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Records",
    post,
    path = "/payer-addresses",
    request_body = CreateAddressRequest,
    responses(
        (status = 200, description = "Address created", body = AddressRecord),
        (status = 400, description = "Address missing", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session token", body = ErrorResponse)
    )
)]
pub async fn create_payer_address(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CreateAddressRequest>,
) -> impl Responder {
    let user_id = match authorized_user(&req) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    if body.address.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request("Address is required"));
    }

    let record = state
        .records
        .create_address(Party::Payer, &user_id, body.address.trim());
    HttpResponse::Ok().json(record)
}
