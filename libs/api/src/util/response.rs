use entity::prelude::ImageRef;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema, Debug, PartialEq)]
pub struct PaginationResp {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl PaginationResp {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            pages: total.div_ceil(limit.max(1)),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct MessageResp {
    pub message: String,
}

impl MessageResp {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct GetImageResp {
    pub data: ImageRef,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pages_round_up() {
        assert_eq!(PaginationResp::new(1, 10, 0).pages, 0);
        assert_eq!(PaginationResp::new(1, 10, 10).pages, 1);
        assert_eq!(PaginationResp::new(2, 10, 11).pages, 2);
    }
}
