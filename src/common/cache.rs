// src/common/cache.rs

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Relógio injetável, para que o TTL seja testável sem esperar de verdade.
pub trait Relogio: Send + Sync + 'static {
    fn agora(&self) -> Instant;
}

pub struct RelogioSistema;

impl Relogio for RelogioSistema {
    fn agora(&self) -> Instant {
        Instant::now()
    }
}

/// Cache de um único valor com TTL. É só uma otimização de leitura: quem
/// escreve no roster invalida o cache inteiro e a próxima leitura busca de
/// novo no banco. Nunca é fonte de verdade.
pub struct CacheComTtl<T> {
    ttl: Duration,
    relogio: Arc<dyn Relogio>,
    slot: RwLock<Option<(Instant, T)>>,
}

impl<T: Clone> CacheComTtl<T> {
    pub fn new(ttl: Duration, relogio: Arc<dyn Relogio>) -> Self {
        Self {
            ttl,
            relogio,
            slot: RwLock::new(None),
        }
    }

    /// Valor ainda dentro do TTL, se houver.
    pub async fn obter(&self) -> Option<T> {
        let slot = self.slot.read().await;
        match slot.as_ref() {
            Some((gravado_em, valor))
                if self.relogio.agora().duration_since(*gravado_em) < self.ttl =>
            {
                Some(valor.clone())
            }
            _ => None,
        }
    }

    pub async fn guardar(&self, valor: T) {
        let mut slot = self.slot.write().await;
        *slot = Some((self.relogio.agora(), valor));
    }

    /// Invalidação é sempre por atacado, nunca parcial.
    pub async fn invalidar(&self) {
        let mut slot = self.slot.write().await;
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Relógio de teste: começa em um instante fixo e avança manualmente.
    struct RelogioFake {
        inicio: Instant,
        avanco: Mutex<Duration>,
    }

    impl RelogioFake {
        fn new() -> Self {
            Self {
                inicio: Instant::now(),
                avanco: Mutex::new(Duration::ZERO),
            }
        }

        fn avancar(&self, delta: Duration) {
            *self.avanco.lock().unwrap() += delta;
        }
    }

    impl Relogio for RelogioFake {
        fn agora(&self) -> Instant {
            self.inicio + *self.avanco.lock().unwrap()
        }
    }

    #[tokio::test]
    async fn devolve_valor_dentro_do_ttl_e_expira_depois() {
        let relogio = Arc::new(RelogioFake::new());
        let cache: CacheComTtl<Vec<String>> =
            CacheComTtl::new(Duration::from_secs(300), relogio.clone());

        assert!(cache.obter().await.is_none());

        cache.guardar(vec!["Trovão".to_string()]).await;
        assert_eq!(cache.obter().await.unwrap().len(), 1);

        relogio.avancar(Duration::from_secs(299));
        assert!(cache.obter().await.is_some());

        relogio.avancar(Duration::from_secs(2));
        assert!(cache.obter().await.is_none());
    }

    #[tokio::test]
    async fn invalidar_descarta_o_valor_inteiro() {
        let relogio = Arc::new(RelogioFake::new());
        let cache: CacheComTtl<u32> = CacheComTtl::new(Duration::from_secs(300), relogio);

        cache.guardar(7).await;
        cache.invalidar().await;
        assert!(cache.obter().await.is_none());
    }
}
