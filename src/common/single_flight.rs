// src/common/single_flight.rs

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Guarda de requisição única por id: enquanto um toggle/ação estiver em
/// voo para um id, uma segunda tentativa para o mesmo id é recusada.
/// Vale apenas dentro deste processo, não há exclusão entre clientes.
#[derive(Clone, Default)]
pub struct SingleFlight {
    em_voo: Arc<Mutex<HashSet<Uuid>>>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tenta reservar o id. Retorna false se já houver operação em voo.
    pub fn acquire(&self, id: Uuid) -> bool {
        let mut em_voo = self.em_voo.lock().expect("mutex do single-flight envenenado");
        em_voo.insert(id)
    }

    /// Libera o id. Chamar sempre, inclusive no caminho de erro.
    pub fn release(&self, id: Uuid) {
        let mut em_voo = self.em_voo.lock().expect("mutex do single-flight envenenado");
        em_voo.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segunda_aquisicao_do_mesmo_id_falha() {
        let guard = SingleFlight::new();
        let id = Uuid::new_v4();

        assert!(guard.acquire(id));
        assert!(!guard.acquire(id));

        guard.release(id);
        assert!(guard.acquire(id));
    }

    #[test]
    fn ids_distintos_nao_interferem() {
        let guard = SingleFlight::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert!(guard.acquire(a));
        assert!(guard.acquire(b));
    }
}
