//! Proveedor de opciones del catálogo
//!
//! Obtiene y cachea por sesión los tres niveles dependientes (origins,
//! makes por origin, models por make) y expone las opciones estáticas.
//!
//! No hay cancelación de red: cada carga recibe un token monótono y su
//! resultado solo se aplica si sigue siendo el último emitido.

use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::clients::CatalogApi;
use crate::models::catalog::{
    self, group_makes_by_origin, CatalogMake, CatalogModel, CatalogOrigin, FuelType, MakeGroup,
};
use crate::utils::errors::AppResult;

/// Resultado de una carga dependiente
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    /// El resultado se aplicó al estado (o venía de la cache)
    Applied(Vec<T>),
    /// Llegó tarde: un parámetro más reciente ya fue solicitado
    Stale,
}

impl<T> FetchOutcome<T> {
    pub fn is_stale(&self) -> bool {
        matches!(self, FetchOutcome::Stale)
    }

    pub fn into_items(self) -> Option<Vec<T>> {
        match self {
            FetchOutcome::Applied(items) => Some(items),
            FetchOutcome::Stale => None,
        }
    }
}

#[derive(Debug)]
struct OptionsState<K, T> {
    latest_token: u64,
    param: Option<K>,
    items: Vec<T>,
    loading: bool,
    loaded: bool,
}

impl<K, T> Default for OptionsState<K, T> {
    fn default() -> Self {
        Self {
            latest_token: 0,
            param: None,
            items: Vec::new(),
            loading: false,
            loaded: false,
        }
    }
}

/// Lista de opciones que depende de un parámetro (origin id, make id...)
#[derive(Debug)]
pub struct DependentOptions<K, T> {
    name: &'static str,
    state: RwLock<OptionsState<K, T>>,
}

impl<K, T> DependentOptions<K, T>
where
    K: Clone + PartialEq + Debug,
    T: Clone,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: RwLock::new(OptionsState::default()),
        }
    }

    /// Cargar las opciones para `param`.
    ///
    /// Reutiliza la cache si el parámetro no cambió y la última carga tuvo
    /// éxito. El flag de carga se activa antes de iniciar la petición. Un
    /// error de red se degrada a lista vacía.
    pub async fn load<F, Fut>(&self, param: K, fetch: F) -> FetchOutcome<T>
    where
        F: FnOnce(K) -> Fut,
        Fut: Future<Output = AppResult<Vec<T>>>,
    {
        let token = {
            let mut state = self.state.write().await;

            if state.loaded && !state.loading && state.param.as_ref() == Some(&param) {
                debug!("📥 Opciones {} desde cache para {:?}", self.name, param);
                return FetchOutcome::Applied(state.items.clone());
            }

            if state.param.as_ref() != Some(&param) {
                state.items.clear();
                state.loaded = false;
            }
            state.latest_token += 1;
            state.param = Some(param.clone());
            state.loading = true;
            state.latest_token
        };

        debug!("🔄 Cargando {} para {:?} (token {})", self.name, param, token);
        let result = fetch(param.clone()).await;

        let mut state = self.state.write().await;
        if state.latest_token != token {
            debug!(
                "⏭️ Resultado obsoleto de {} para {:?} descartado (token {} < {})",
                self.name, param, token, state.latest_token
            );
            return FetchOutcome::Stale;
        }

        let (items, loaded) = match result {
            Ok(items) => {
                info!("✅ {} {} cargados para {:?}", items.len(), self.name, param);
                (items, true)
            }
            Err(e) => {
                warn!("⚠️ Error cargando {} para {:?}: {} - lista vacía", self.name, param, e);
                (Vec::new(), false)
            }
        };

        state.items = items.clone();
        state.loading = false;
        state.loaded = loaded;
        FetchOutcome::Applied(items)
    }

    /// Opciones visibles actualmente
    pub async fn items(&self) -> Vec<T> {
        self.state.read().await.items.clone()
    }

    /// Parámetro de la última carga solicitada
    pub async fn param(&self) -> Option<K> {
        self.state.read().await.param.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Olvidar la cache; una carga en vuelo queda obsoleta
    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        state.latest_token += 1;
        state.param = None;
        state.items.clear();
        state.loading = false;
        state.loaded = false;
    }
}

/// Proveedor de opciones del asistente
pub struct CatalogOptionProvider {
    api: Arc<dyn CatalogApi>,
    origins: DependentOptions<(), CatalogOrigin>,
    makes: DependentOptions<Option<i64>, CatalogMake>,
    models: DependentOptions<i64, CatalogModel>,
    include_hydrogen: bool,
}

impl CatalogOptionProvider {
    pub fn new(api: Arc<dyn CatalogApi>, include_hydrogen: bool) -> Self {
        Self {
            api,
            origins: DependentOptions::new("origins"),
            makes: DependentOptions::new("makes"),
            models: DependentOptions::new("models"),
            include_hydrogen,
        }
    }

    /// Origins: se piden una vez por sesión; vacío si falla
    pub async fn list_origins(&self) -> Vec<CatalogOrigin> {
        let api = self.api.clone();
        match self.origins.load((), |_| async move { api.get_origins().await }).await {
            FetchOutcome::Applied(items) => items,
            FetchOutcome::Stale => self.origins.items().await,
        }
    }

    /// Reintentar origins después de un fallo
    pub async fn refresh_origins(&self) -> Vec<CatalogOrigin> {
        self.origins.invalidate().await;
        self.list_origins().await
    }

    /// Makes filtradas por origin; `None` pide el superconjunto
    pub async fn list_makes(&self, origin_id: Option<i64>) -> FetchOutcome<CatalogMake> {
        let api = self.api.clone();
        self.makes
            .load(origin_id, |origin_id| async move { api.get_makes(origin_id).await })
            .await
    }

    /// Makes visibles agrupadas por país de origen
    pub async fn grouped_makes(&self) -> Vec<MakeGroup> {
        group_makes_by_origin(&self.makes.items().await)
    }

    /// Models de una make; sin make no hay petición y la lista es vacía
    pub async fn list_models(&self, make_id: Option<i64>) -> FetchOutcome<CatalogModel> {
        let Some(make_id) = make_id else {
            return FetchOutcome::Applied(Vec::new());
        };

        let api = self.api.clone();
        self.models
            .load(make_id, |make_id| async move { api.get_models(make_id).await })
            .await
    }

    pub async fn origins(&self) -> Vec<CatalogOrigin> {
        self.origins.items().await
    }

    pub async fn makes(&self) -> Vec<CatalogMake> {
        self.makes.items().await
    }

    pub async fn models(&self) -> Vec<CatalogModel> {
        self.models.items().await
    }

    pub async fn is_loading_origins(&self) -> bool {
        self.origins.is_loading().await
    }

    pub async fn is_loading_makes(&self) -> bool {
        self.makes.is_loading().await
    }

    pub async fn is_loading_models(&self) -> bool {
        self.models.is_loading().await
    }

    pub fn fuel_types(&self) -> Vec<FuelType> {
        catalog::fuel_types(self.include_hydrogen)
    }

    pub fn years(&self) -> Vec<i32> {
        catalog::year_range(catalog::max_model_year() - 1)
    }
}
