//! Protocolo de transferencia de propiedad
//!
//! Dos operaciones sobre un vehículo: el propietario genera un código de
//! transferencia y otro usuario lo reclama. El reclamo reasigna owner_id y
//! limpia transfer_code en una única mutación condicional del store, de modo
//! que ante reclamos concurrentes del mismo código exactamente uno gana.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::models::vehicle::Vehicle;
use crate::services::transfer_code::{generate_transfer_code, normalize_code};
use crate::utils::errors::AppError;

/// Intentos de generación ante colisión con otro código activo
const MAX_CODE_ATTEMPTS: usize = 3;

/// Acceso al store de vehículos requerido por el protocolo de transferencia
///
/// Las dos mutaciones son condicionales y atómicas respecto a llamadas
/// concurrentes: la condición se evalúa en la misma operación que escribe,
/// nunca en una lectura separada.
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Leer un vehículo por id
    async fn get_vehicle(&self, id: Uuid) -> Result<Option<Vehicle>, AppError>;

    /// Escribir transfer_code solo si el vehículo sigue perteneciendo a owner_id.
    /// Devuelve false si ninguna fila coincidió. Un código ya activo en otro
    /// vehículo produce `AppError::Conflict`.
    async fn set_transfer_code(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        code: &str,
    ) -> Result<bool, AppError>;

    /// Reasignar owner_id y limpiar transfer_code en una sola mutación,
    /// solo si el código sigue activo. Devuelve el id del vehículo afectado,
    /// o None si el código no coincidió con ninguna fila.
    async fn claim_by_code(
        &self,
        code: &str,
        new_owner_id: Uuid,
    ) -> Result<Option<Uuid>, AppError>;
}

/// Servicio del protocolo de transferencia
pub struct TransferService {
    store: Arc<dyn VehicleStore>,
}

impl TransferService {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self { store }
    }

    /// Generar (o regenerar) el código de transferencia de un vehículo
    ///
    /// Solo el propietario actual puede hacerlo. Regenerar sobrescribe el
    /// código anterior: únicamente el último código emitido es reclamable.
    pub async fn initiate_transfer(
        &self,
        vehicle_id: Uuid,
        requesting_user_id: Uuid,
    ) -> Result<String, AppError> {
        let vehicle = self
            .store
            .get_vehicle(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if vehicle.owner_id != requesting_user_id {
            return Err(AppError::Forbidden(
                "Only the current owner can generate a transfer code".to_string(),
            ));
        }

        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_transfer_code();

            match self
                .store
                .set_transfer_code(vehicle_id, requesting_user_id, &code)
                .await
            {
                Ok(true) => {
                    info!(vehicle_id = %vehicle_id, "transfer code issued");
                    return Ok(code);
                }
                // La propiedad cambió entre la lectura y la escritura condicional
                Ok(false) => {
                    return Err(AppError::Forbidden(
                        "Only the current owner can generate a transfer code".to_string(),
                    ));
                }
                // Colisión con un código activo de otro vehículo: reintentar
                Err(AppError::Conflict(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::Internal(
            "Could not allocate a unique transfer code".to_string(),
        ))
    }

    /// Reclamar un vehículo presentando su código de transferencia
    ///
    /// La búsqueda y la reasignación ocurren en una única mutación condicional
    /// del store: de N reclamos concurrentes del mismo código, uno ve el id
    /// del vehículo y el resto recibe `InvalidCode`. Un código inexistente,
    /// ya reclamado o regenerado produce exactamente el mismo error.
    pub async fn claim_transfer(
        &self,
        presented_code: &str,
        claiming_user_id: Uuid,
    ) -> Result<Uuid, AppError> {
        let code = normalize_code(presented_code);
        if code.is_empty() {
            return Err(AppError::InvalidCode);
        }

        match self.store.claim_by_code(&code, claiming_user_id).await? {
            Some(vehicle_id) => {
                info!(vehicle_id = %vehicle_id, new_owner = %claiming_user_id, "vehicle claimed");
                Ok(vehicle_id)
            }
            None => Err(AppError::InvalidCode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Store en memoria cuyas mutaciones condicionales son secciones críticas,
    /// igual que los UPDATE condicionales de PostgreSQL que replica.
    struct MemVehicleStore {
        vehicles: Mutex<HashMap<Uuid, Vehicle>>,
        records: Mutex<HashMap<Uuid, Vec<Uuid>>>,
    }

    impl MemVehicleStore {
        fn new() -> Self {
            Self {
                vehicles: Mutex::new(HashMap::new()),
                records: Mutex::new(HashMap::new()),
            }
        }

        fn insert_vehicle(&self, vehicle: Vehicle) {
            self.vehicles.lock().unwrap().insert(vehicle.id, vehicle);
        }

        fn insert_records(&self, vehicle_id: Uuid, count: usize) {
            let ids = (0..count).map(|_| Uuid::new_v4()).collect();
            self.records.lock().unwrap().insert(vehicle_id, ids);
        }

        fn vehicle(&self, id: Uuid) -> Vehicle {
            self.vehicles.lock().unwrap().get(&id).unwrap().clone()
        }

        fn record_ids(&self, vehicle_id: Uuid) -> Vec<Uuid> {
            self.records
                .lock()
                .unwrap()
                .get(&vehicle_id)
                .cloned()
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl VehicleStore for MemVehicleStore {
        async fn get_vehicle(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
            Ok(self.vehicles.lock().unwrap().get(&id).cloned())
        }

        async fn set_transfer_code(
            &self,
            vehicle_id: Uuid,
            owner_id: Uuid,
            code: &str,
        ) -> Result<bool, AppError> {
            let mut vehicles = self.vehicles.lock().unwrap();

            if vehicles
                .values()
                .any(|v| v.id != vehicle_id && v.transfer_code.as_deref() == Some(code))
            {
                return Err(AppError::Conflict(
                    "transfer code already active".to_string(),
                ));
            }

            match vehicles.get_mut(&vehicle_id) {
                Some(v) if v.owner_id == owner_id => {
                    v.transfer_code = Some(code.to_string());
                    Ok(true)
                }
                _ => Ok(false),
            }
        }

        async fn claim_by_code(
            &self,
            code: &str,
            new_owner_id: Uuid,
        ) -> Result<Option<Uuid>, AppError> {
            let mut vehicles = self.vehicles.lock().unwrap();

            match vehicles
                .values_mut()
                .find(|v| v.transfer_code.as_deref() == Some(code))
            {
                Some(v) => {
                    v.owner_id = new_owner_id;
                    v.transfer_code = None;
                    Ok(Some(v.id))
                }
                None => Ok(None),
            }
        }
    }

    fn setup() -> (Arc<MemVehicleStore>, TransferService, Vehicle, Uuid) {
        let store = Arc::new(MemVehicleStore::new());
        let owner = Uuid::new_v4();
        let vehicle = Vehicle::new(
            owner,
            "Toyota".to_string(),
            "Corolla".to_string(),
            2015,
            Some("1HGBH41JXMN109186".to_string()),
        );
        store.insert_vehicle(vehicle.clone());
        let service = TransferService::new(store.clone());
        (store, service, vehicle, owner)
    }

    #[tokio::test]
    async fn test_initiate_transfer_sets_code() {
        let (store, service, vehicle, owner) = setup();

        let code = service.initiate_transfer(vehicle.id, owner).await.unwrap();

        assert_eq!(code.len(), 8);
        assert_eq!(store.vehicle(vehicle.id).transfer_code.as_deref(), Some(code.as_str()));
    }

    #[tokio::test]
    async fn test_initiate_transfer_by_non_owner_is_forbidden() {
        let (store, service, vehicle, _owner) = setup();
        let stranger = Uuid::new_v4();

        let result = service.initiate_transfer(vehicle.id, stranger).await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
        // El código no cambió
        assert!(store.vehicle(vehicle.id).transfer_code.is_none());
    }

    #[tokio::test]
    async fn test_initiate_transfer_unknown_vehicle() {
        let (_store, service, _vehicle, owner) = setup();

        let result = service.initiate_transfer(Uuid::new_v4(), owner).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_claim_transfer_reassigns_owner_and_clears_code() {
        let (store, service, vehicle, owner) = setup();
        let buyer = Uuid::new_v4();

        let code = service.initiate_transfer(vehicle.id, owner).await.unwrap();
        let claimed_id = service.claim_transfer(&code, buyer).await.unwrap();

        assert_eq!(claimed_id, vehicle.id);
        let after = store.vehicle(vehicle.id);
        assert_eq!(after.owner_id, buyer);
        assert!(after.transfer_code.is_none());
        // El resto de campos no cambia
        assert_eq!(after.make, vehicle.make);
        assert_eq!(after.model, vehicle.model);
        assert_eq!(after.year, vehicle.year);
        assert_eq!(after.vin, vehicle.vin);
    }

    #[tokio::test]
    async fn test_claim_is_case_insensitive_and_trimmed() {
        let (_store, service, vehicle, owner) = setup();
        let buyer = Uuid::new_v4();

        let code = service.initiate_transfer(vehicle.id, owner).await.unwrap();
        let presented = format!("  {}  ", code.to_lowercase());

        let claimed_id = service.claim_transfer(&presented, buyer).await.unwrap();
        assert_eq!(claimed_id, vehicle.id);
    }

    #[tokio::test]
    async fn test_claimed_code_is_single_use() {
        let (_store, service, vehicle, owner) = setup();
        let buyer = Uuid::new_v4();
        let late_buyer = Uuid::new_v4();

        let code = service.initiate_transfer(vehicle.id, owner).await.unwrap();
        service.claim_transfer(&code, buyer).await.unwrap();

        let result = service.claim_transfer(&code, late_buyer).await;
        assert!(matches!(result, Err(AppError::InvalidCode)));
    }

    #[tokio::test]
    async fn test_regenerating_invalidates_previous_code() {
        let (store, service, vehicle, owner) = setup();
        let buyer = Uuid::new_v4();

        let first = service.initiate_transfer(vehicle.id, owner).await.unwrap();
        let second = service.initiate_transfer(vehicle.id, owner).await.unwrap();
        assert_ne!(first, second);

        // El primer código ya no es reclamable
        let stale = service.claim_transfer(&first, buyer).await;
        assert!(matches!(stale, Err(AppError::InvalidCode)));
        assert_eq!(store.vehicle(vehicle.id).owner_id, owner);

        // El último sí
        let claimed_id = service.claim_transfer(&second, buyer).await.unwrap();
        assert_eq!(claimed_id, vehicle.id);
    }

    #[tokio::test]
    async fn test_claim_with_unknown_or_empty_code() {
        let (_store, service, _vehicle, _owner) = setup();
        let buyer = Uuid::new_v4();

        let unknown = service.claim_transfer("ZZZZ9999", buyer).await;
        assert!(matches!(unknown, Err(AppError::InvalidCode)));

        let empty = service.claim_transfer("   ", buyer).await;
        assert!(matches!(empty, Err(AppError::InvalidCode)));
    }

    #[tokio::test]
    async fn test_maintenance_records_survive_transfer() {
        let (store, service, vehicle, owner) = setup();
        let buyer = Uuid::new_v4();
        store.insert_records(vehicle.id, 3);

        let before = store.record_ids(vehicle.id);
        let code = service.initiate_transfer(vehicle.id, owner).await.unwrap();
        service.claim_transfer(&code, buyer).await.unwrap();
        let after = store.record_ids(vehicle.id);

        assert_eq!(before.len(), 3);
        assert_eq!(before, after);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_claims_exactly_one_wins() {
        let (store, service, vehicle, owner) = setup();
        let service = Arc::new(service);

        let code = service.initiate_transfer(vehicle.id, owner).await.unwrap();

        let claimers: Vec<Uuid> = (0..10).map(|_| Uuid::new_v4()).collect();
        let handles: Vec<_> = claimers
            .iter()
            .map(|&claimer| {
                let service = service.clone();
                let code = code.clone();
                tokio::spawn(async move { service.claim_transfer(&code, claimer).await })
            })
            .collect();

        let results = futures::future::join_all(handles).await;

        let mut winners = 0;
        let mut invalid = 0;
        for result in results {
            match result.unwrap() {
                Ok(id) => {
                    assert_eq!(id, vehicle.id);
                    winners += 1;
                }
                Err(AppError::InvalidCode) => invalid += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(invalid, 9);

        // El ganador es uno de los reclamantes y el código quedó limpio
        let after = store.vehicle(vehicle.id);
        assert!(claimers.contains(&after.owner_id));
        assert!(after.transfer_code.is_none());
    }

    #[tokio::test]
    async fn test_owner_cannot_reissue_after_losing_ownership() {
        let (store, service, vehicle, owner) = setup();
        let buyer = Uuid::new_v4();

        let code = service.initiate_transfer(vehicle.id, owner).await.unwrap();
        service.claim_transfer(&code, buyer).await.unwrap();

        // El propietario anterior ya no puede generar códigos
        let result = service.initiate_transfer(vehicle.id, owner).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert_eq!(store.vehicle(vehicle.id).owner_id, buyer);
    }
}
