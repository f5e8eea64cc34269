use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::RequestShape;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ModelInput {
    /// Monthly consumption history, oldest first.
    #[serde(rename = "consumosKWh")]
    #[validate(length(min = 1, message = "Informe ao menos um consumo."))]
    pub consumos_kwh: Vec<f64>,
}

impl RequestShape for ModelInput {
    fn wire_name(field: &str) -> String {
        match field {
            "consumos_kwh" => "consumosKWh".into(),
            other => other.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelOutput {
    #[serde(rename = "consumoPrevistoKWh")]
    pub consumo_previsto_kwh: f64,
}

pub trait Predictor: Send + Sync {
    fn predict(&self, input: &ModelInput) -> anyhow::Result<ModelOutput>;
}

/// Least-squares line through the history, extrapolated one month ahead.
#[derive(Debug, Clone, Default)]
pub struct LinearTrendPredictor;

impl Predictor for LinearTrendPredictor {
    fn predict(&self, input: &ModelInput) -> anyhow::Result<ModelOutput> {
        let ys = &input.consumos_kwh;
        anyhow::ensure!(!ys.is_empty(), "empty consumption history");
        anyhow::ensure!(
            ys.iter().all(|y| y.is_finite()),
            "consumption history contains non-finite values"
        );
        anyhow::ensure!(
            ys.iter().all(|y| *y >= 0.0),
            "O consumo não pode ser negativo."
        );

        let n = ys.len() as f64;
        if ys.len() == 1 {
            return Ok(ModelOutput { consumo_previsto_kwh: ys[0].max(0.0) });
        }

        let mean_x = (n - 1.0) / 2.0;
        let mean_y = ys.iter().sum::<f64>() / n;
        let (mut sxy, mut sxx) = (0.0, 0.0);
        for (i, y) in ys.iter().enumerate() {
            let dx = i as f64 - mean_x;
            sxy += dx * (y - mean_y);
            sxx += dx * dx;
        }
        let slope = sxy / sxx;
        let next = mean_y + slope * (n - mean_x);
        anyhow::ensure!(next.is_finite(), "consumption history is out of range");

        Ok(ModelOutput { consumo_previsto_kwh: next.max(0.0) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predict(ys: &[f64]) -> f64 {
        LinearTrendPredictor
            .predict(&ModelInput { consumos_kwh: ys.to_vec() })
            .unwrap()
            .consumo_previsto_kwh
    }

    #[test]
    fn single_point_repeats() {
        assert_eq!(predict(&[150.5]), 150.5);
    }

    #[test]
    fn follows_linear_trend() {
        assert!((predict(&[100.0, 110.0, 120.0]) - 130.0).abs() < 1e-9);
        assert!((predict(&[200.0, 200.0, 200.0, 200.0]) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn never_negative() {
        assert_eq!(predict(&[30.0, 10.0]), 0.0);
    }

    #[test]
    fn rejects_negative_readings() {
        let err = LinearTrendPredictor
            .predict(&ModelInput { consumos_kwh: vec![-500.0, -400.0] })
            .unwrap_err();
        assert!(err.to_string().contains("negativo"));
    }

    #[test]
    fn overflowing_trend_is_an_error() {
        let err = LinearTrendPredictor
            .predict(&ModelInput { consumos_kwh: vec![0.0, f64::MAX] })
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn rejects_nan() {
        let err = LinearTrendPredictor
            .predict(&ModelInput { consumos_kwh: vec![1.0, f64::NAN] })
            .unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }
}
