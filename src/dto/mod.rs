//! DTOs - formas de los mensajes intercambiados con el backend

pub mod catalog_dto;
pub mod vehicle_dto;

pub use catalog_dto::{MakeDto, ModelDto, OriginDto, PageResponse};
pub use vehicle_dto::{ApiErrorBody, VehicleRequest, VehicleResponseDto, VehiclesListResponseDto};
