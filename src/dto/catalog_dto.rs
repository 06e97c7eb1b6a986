use serde::{Deserialize, Deserializer, Serialize};

use crate::models::catalog::{CatalogMake, CatalogModel, CatalogOrigin};

// El backend envía ids de marca/modelo como número o como string numérico
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientId {
    Number(i64),
    Text(String),
}

pub fn deserialize_lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match LenientId::deserialize(deserializer)? {
        LenientId::Number(n) => Ok(n),
        LenientId::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid catalog id '{}'", s))),
    }
}

// Response de origen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginDto {
    pub id: i64,
    pub name: String,
    pub make_count: Option<u32>,
    pub model_count: Option<u32>,
}

// Response de marca
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeDto {
    #[serde(deserialize_with = "deserialize_lenient_id")]
    pub id: i64,
    pub name: String,
    pub logo_url: Option<String>,
    pub origin_country: Option<String>,
    pub origin_id: Option<i64>,
}

// Response de modelo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDto {
    #[serde(deserialize_with = "deserialize_lenient_id")]
    pub id: i64,
    #[serde(deserialize_with = "deserialize_lenient_id")]
    pub make_id: i64,
    pub name: String,
}

/// Página estilo Spring Data; solo se usa `content`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub number: u32,
}

impl From<OriginDto> for CatalogOrigin {
    fn from(dto: OriginDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            make_count: dto.make_count,
            model_count: dto.model_count,
        }
    }
}

impl From<MakeDto> for CatalogMake {
    fn from(dto: MakeDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            logo_url: dto.logo_url.filter(|u| !u.is_empty()),
            origin_country: dto.origin_country,
            origin_id: dto.origin_id,
        }
    }
}

impl From<ModelDto> for CatalogModel {
    fn from(dto: ModelDto) -> Self {
        Self {
            id: dto.id,
            make_id: dto.make_id,
            name: dto.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_make_accepts_string_and_numeric_ids() {
        let page: PageResponse<MakeDto> = serde_json::from_value(json!({
            "content": [
                {"id": "7", "name": "Toyota", "originCountry": "Japan", "logoUrl": ""},
                {"id": 8, "name": "Honda", "originCountry": null}
            ],
            "totalElements": 2,
            "totalPages": 1,
            "size": 200,
            "number": 0
        }))
        .unwrap();

        let makes: Vec<CatalogMake> = page.content.into_iter().map(Into::into).collect();
        assert_eq!(makes[0].id, 7);
        assert_eq!(makes[0].logo_url, None);
        assert_eq!(makes[1].id, 8);
        assert_eq!(makes[1].origin_country, None);
    }

    #[test]
    fn test_page_without_content_is_empty() {
        let page: PageResponse<ModelDto> = serde_json::from_value(json!({"totalElements": 0})).unwrap();
        assert!(page.content.is_empty());
    }

    #[test]
    fn test_rejects_non_numeric_id() {
        let result: Result<ModelDto, _> =
            serde_json::from_value(json!({"id": "abc", "makeId": 7, "name": "Corolla"}));
        assert!(result.is_err());
    }
}
