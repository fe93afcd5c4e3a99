//! Application state: one struct per domain, each paired with the
//! service it calls.

use std::sync::Arc;

use crate::domains::admin::AdminState;
use crate::domains::catalog::CatalogState;
use crate::domains::health::HealthState;
use crate::domains::search::SearchState;
use crate::domains::subscribe::SubscribeState;
use crate::domains::upload::UploadState;
use crate::services::{AdminService, CatalogService, Services, SubscriberService, UploadService};

#[derive(Debug)]
pub struct CatalogDomain {
    pub state: CatalogState,
    pub service: Arc<dyn CatalogService>,
}

#[derive(Debug)]
pub struct SearchDomain {
    pub state: SearchState,
    // Search runs against the catalog endpoints.
    pub service: Arc<dyn CatalogService>,
}

#[derive(Debug)]
pub struct AdminDomain {
    pub state: AdminState,
    pub service: Arc<dyn AdminService>,
}

#[derive(Debug)]
pub struct SubscribeDomain {
    pub state: SubscribeState,
    pub service: Arc<dyn SubscriberService>,
}

#[derive(Debug)]
pub struct UploadDomain {
    pub state: UploadState,
    pub service: Arc<dyn UploadService>,
}

#[derive(Debug)]
pub struct HealthDomain {
    pub state: HealthState,
    // Health probes go through the admin surface.
    pub service: Arc<dyn AdminService>,
}

#[derive(Debug)]
pub struct State {
    pub catalog: CatalogDomain,
    pub search: SearchDomain,
    pub admin: AdminDomain,
    pub subscribe: SubscribeDomain,
    pub upload: UploadDomain,
    pub health: HealthDomain,
}

impl State {
    pub fn new(services: Services) -> Self {
        Self {
            catalog: CatalogDomain {
                state: CatalogState::default(),
                service: services.catalog.clone(),
            },
            search: SearchDomain {
                state: SearchState::default(),
                service: services.catalog.clone(),
            },
            admin: AdminDomain {
                state: AdminState::default(),
                service: services.admin.clone(),
            },
            subscribe: SubscribeDomain {
                state: SubscribeState::default(),
                service: services.subscribers,
            },
            upload: UploadDomain {
                state: UploadState::default(),
                service: services.upload,
            },
            health: HealthDomain {
                state: HealthState::default(),
                service: services.admin,
            },
        }
    }
}
