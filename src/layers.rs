use serde::Serialize;

use crate::{location_label, Ambassador, LatLng, MapMarker, Merchant, ToggleSet};

/// The two independently switchable marker groups on the directory map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LayerKind {
    Ambassadors,
    Merchants,
}

#[derive(Debug, Clone, Default)]
struct LayerState {
    visible: bool,
    open: ToggleSet,
}

/// Per-layer visibility plus popup toggle state for the directory map.
/// Each layer keeps its own `ToggleSet`, so popup indices never cross
/// between ambassadors and merchants.
#[derive(Debug, Clone)]
pub(crate) struct MapLayers {
    ambassadors: LayerState,
    merchants: LayerState,
}

impl MapLayers {
    pub(crate) fn new(ambassadors_visible: bool, merchants_visible: bool) -> Self {
        MapLayers {
            ambassadors: LayerState {
                visible: ambassadors_visible,
                open: ToggleSet::new(),
            },
            merchants: LayerState {
                visible: merchants_visible,
                open: ToggleSet::new(),
            },
        }
    }

    fn layer(&self, kind: LayerKind) -> &LayerState {
        match kind {
            LayerKind::Ambassadors => &self.ambassadors,
            LayerKind::Merchants => &self.merchants,
        }
    }

    fn layer_mut(&mut self, kind: LayerKind) -> &mut LayerState {
        match kind {
            LayerKind::Ambassadors => &mut self.ambassadors,
            LayerKind::Merchants => &mut self.merchants,
        }
    }

    pub(crate) fn set_visible(&mut self, kind: LayerKind, visible: bool) {
        self.layer_mut(kind).visible = visible;
    }

    pub(crate) fn is_visible(&self, kind: LayerKind) -> bool {
        self.layer(kind).visible
    }

    pub(crate) fn toggle_marker(&mut self, kind: LayerKind, index: usize) {
        self.layer_mut(kind).open.toggle(index);
    }

    #[allow(dead_code)]
    pub(crate) fn is_marker_open(&self, kind: LayerKind, index: usize) -> bool {
        self.layer(kind).open.is_open(index)
    }

    /// A hidden layer contributes zero markers: it is excluded from the
    /// data handed downstream, not merely flagged.
    pub(crate) fn markers<'a>(&self, kind: LayerKind, all: &'a [MapMarker]) -> &'a [MapMarker] {
        if self.layer(kind).visible { all } else { &[] }
    }

    pub(crate) fn export(
        &self,
        ambassador_markers: &[MapMarker],
        merchant_markers: &[MapMarker],
    ) -> MapExport {
        MapExport {
            ambassadors: LayerExport {
                visible: self.ambassadors.visible,
                markers: self
                    .markers(LayerKind::Ambassadors, ambassador_markers)
                    .to_vec(),
                open_indices: self.ambassadors.open.open_indices(),
            },
            merchants: LayerExport {
                visible: self.merchants.visible,
                markers: self.markers(LayerKind::Merchants, merchant_markers).to_vec(),
                open_indices: self.merchants.open.open_indices(),
            },
        }
    }
}

/// One layer's slice of the map export.
#[derive(Debug, Serialize)]
pub(crate) struct LayerExport {
    pub(crate) visible: bool,
    pub(crate) markers: Vec<MapMarker>,
    pub(crate) open_indices: Vec<usize>,
}

/// Everything an external map renderer needs to draw the directory map.
#[derive(Debug, Serialize)]
pub(crate) struct MapExport {
    pub(crate) ambassadors: LayerExport,
    pub(crate) merchants: LayerExport,
}

/// Derived, read-only marker projection: one marker per ambassador city,
/// titled with the nickname and described with the city label. The fetched
/// records themselves stay untouched.
pub(crate) fn ambassador_markers(ambassadors: &[Ambassador]) -> Vec<MapMarker> {
    let mut markers = Vec::new();
    for ambassador in ambassadors {
        for city in &ambassador.cities {
            markers.push(MapMarker::new(
                LatLng {
                    lat: city.lat,
                    lng: city.lon,
                },
                Some(ambassador.nickname.clone()),
                Some(location_label(city)),
            ));
        }
    }
    markers
}

/// One marker per merchant storefront. Merchants without any detail text
/// still get a plain pin.
pub(crate) fn merchant_markers(merchants: &[Merchant]) -> Vec<MapMarker> {
    merchants
        .iter()
        .map(|merchant| {
            let title = if merchant.name.is_empty() {
                None
            } else {
                Some(merchant.name.clone())
            };
            MapMarker::new(
                LatLng {
                    lat: merchant.lat,
                    lng: merchant.lon,
                },
                title,
                merchant.address.clone(),
            )
        })
        .collect()
}

/// Single-marker projection for the detail view behind a table's
/// "show on map" action.
pub(crate) fn preview_marker(title: &str, body: &str, lat: f64, lng: f64) -> MapMarker {
    MapMarker::new(
        LatLng { lat, lng },
        Some(title.to_string()),
        Some(body.to_string()),
    )
}
