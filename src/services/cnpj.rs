// src/services/cnpj.rs

//! Consulta de CNPJ no registro externo (BrasilAPI).
//!
//! A consulta fica atrás de um trait para o resto do sistema não saber
//! qual provedor está plugado; rate-limit (429) ganha uma nova tentativa
//! antes de desistir.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::warn;

use crate::{common::error::AppError, models::partner::CnpjRecord};

const RETRY_DELAY_SECS: u64 = 1;

#[async_trait]
pub trait CnpjProvider: Send + Sync {
    /// Busca os dados cadastrais de um CNPJ já normalizado (14 dígitos).
    async fn lookup(&self, cnpj: &str) -> Result<CnpjRecord, AppError>;
}

// --- Formato de resposta da BrasilAPI ---

#[derive(Debug, Deserialize)]
struct BrasilApiCnpjResponse {
    cnpj: String,
    razao_social: String,
    nome_fantasia: Option<String>,
    cnae_fiscal: Option<i64>,
    #[serde(default)]
    cnaes_secundarios: Vec<BrasilApiCnae>,
    municipio: Option<String>,
    uf: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BrasilApiCnae {
    codigo: i64,
}

pub struct BrasilApiCnpjProvider {
    client: Client,
    base_url: String,
}

impl BrasilApiCnpjProvider {
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Falha ao construir o client HTTP da consulta de CNPJ");

        Self { client, base_url }
    }

    async fn fetch(&self, cnpj: &str) -> Result<reqwest::Response, reqwest::Error> {
        let url = format!("{}/api/cnpj/v1/{}", self.base_url, cnpj);
        self.client.get(&url).send().await
    }
}

#[async_trait]
impl CnpjProvider for BrasilApiCnpjProvider {
    async fn lookup(&self, cnpj: &str) -> Result<CnpjRecord, AppError> {
        let mut response = self
            .fetch(cnpj)
            .await
            .map_err(|e| AppError::CnpjLookupFailed(e.to_string()))?;

        // Rate limit: espera um pouco e tenta mais uma vez
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            warn!("BrasilAPI devolveu 429 para o CNPJ {}, tentando de novo", cnpj);
            tokio::time::sleep(Duration::from_secs(RETRY_DELAY_SECS)).await;
            response = self
                .fetch(cnpj)
                .await
                .map_err(|e| AppError::CnpjLookupFailed(e.to_string()))?;
        }

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Err(AppError::InvalidCnpj),
            status => {
                return Err(AppError::CnpjLookupFailed(format!(
                    "status inesperado: {}",
                    status
                )));
            }
        }

        let body: BrasilApiCnpjResponse = response
            .json()
            .await
            .map_err(|e| AppError::CnpjLookupFailed(e.to_string()))?;

        Ok(CnpjRecord {
            cnpj: body.cnpj,
            legal_name: body.razao_social,
            trade_name: body.nome_fantasia,
            cnae_principal: body.cnae_fiscal.map(|c| c.to_string()),
            cnae_secundario: body
                .cnaes_secundarios
                .iter()
                .map(|c| c.codigo.to_string())
                .collect(),
            city: body.municipio,
            state: body.uf,
        })
    }
}
