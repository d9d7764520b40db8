use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_PAGE_SIZE: usize = 50;

/// Sort direction for listing requests. The service encodes this as
/// `1` / `-1` in the `$sort` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortDirection {
    Ascending,
    #[allow(dead_code)]
    Descending,
}

impl SortDirection {
    pub(crate) fn wire_value(self) -> i8 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

/// Request shape for one page of a listing.
#[derive(Debug, Clone)]
pub(crate) struct PageQuery {
    pub(crate) sort_key: String,
    pub(crate) sort_direction: SortDirection,
    pub(crate) limit: usize,
    pub(crate) skip: usize,
}

/// One server response chunk of a paginated listing. `total` is the
/// authoritative count across all pages and may only be trusted once the
/// first page has arrived.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Page<T> {
    pub(crate) total: usize,
    pub(crate) limit: usize,
    pub(crate) skip: usize,
    #[serde(default)]
    pub(crate) data: Vec<T>,
}

/// The fully accumulated result of draining every page of one listing.
/// `data` is the concatenation, in fetch order, of every page's `data`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Collection<T> {
    pub(crate) total: usize,
    pub(crate) limit: usize,
    pub(crate) skip: usize,
    pub(crate) data: Vec<T>,
}

impl<T> Collection<T> {
    pub(crate) fn empty() -> Self {
        Collection {
            total: 0,
            limit: 0,
            skip: 0,
            data: Vec::new(),
        }
    }

    /// Adopts the first page wholesale.
    pub(crate) fn from_first(page: Page<T>) -> Self {
        Collection {
            total: page.total,
            limit: page.limit,
            skip: page.skip,
            data: page.data,
        }
    }

    /// Appends a subsequent page's items and adopts its reported `total`,
    /// so a listing that grows mid-drain extends the loop. Shrinkage or
    /// row movement across the page boundary is not detected.
    pub(crate) fn absorb(&mut self, page: Page<T>) {
        self.total = page.total;
        self.data.extend(page.data);
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct City {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) country: String,
    pub(crate) lat: f64,
    pub(crate) lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Ambassador {
    pub(crate) nickname: String,
    #[serde(default)]
    pub(crate) account: String,
    #[serde(default)]
    pub(crate) telegram: Option<String>,
    #[serde(default)]
    pub(crate) keybase: Option<String>,
    #[serde(default)]
    pub(crate) email: Option<String>,
    #[serde(default)]
    pub(crate) phone: Option<String>,
    #[serde(default)]
    pub(crate) url: Option<String>,
    #[serde(default)]
    pub(crate) cities: Vec<City>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Merchant {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) address: Option<String>,
    #[serde(default)]
    pub(crate) phone: Option<String>,
    #[serde(default)]
    pub(crate) website: Option<String>,
    pub(crate) lat: f64,
    pub(crate) lon: f64,
    #[serde(default)]
    pub(crate) city: Option<String>,
    #[serde(default)]
    pub(crate) country: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct LatLng {
    pub(crate) lat: f64,
    pub(crate) lng: f64,
}

/// What the map renderer receives per marker. Pixel placement, clustering
/// and popup chrome are the renderer's concern.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct MapMarker {
    pub(crate) position: LatLng,
    pub(crate) has_detail: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) detail_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) detail_body: Option<String>,
}

impl MapMarker {
    pub(crate) fn new(
        position: LatLng,
        detail_title: Option<String>,
        detail_body: Option<String>,
    ) -> Self {
        let has_detail = detail_title.is_some() || detail_body.is_some();
        MapMarker {
            position,
            has_detail,
            detail_title,
            detail_body,
        }
    }
}
