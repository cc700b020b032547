use crate::error::EngineError;

/// Glatter en serie med løpende snitt over de siste `n_for_average`
/// y-verdiene; x-verdiene går urørt gjennom.
///
/// De første `n_for_average - 1` punktene bruker et voksende vindu fra
/// starten av serien (asymmetrisk oppvarming, ikke sentrert snitt).
/// `n_for_average = 1` er identitetstransformen.
pub fn filter_series(
    series: &[(f64, f64)],
    n_for_average: usize,
) -> Result<Vec<(f64, f64)>, EngineError> {
    if n_for_average < 1 {
        return Err(EngineError::InvalidWindow);
    }
    if series.len() < n_for_average {
        return Err(EngineError::WindowExceedsSeries {
            n: n_for_average,
            len: series.len(),
        });
    }
    if n_for_average == 1 {
        return Ok(series.to_vec());
    }

    let mut result = Vec::with_capacity(series.len());
    let mut sum = 0.0;
    for i in 0..series.len() {
        sum += series[i].1;
        if i >= n_for_average {
            sum -= series[i - n_for_average].1;
        }
        let denom = (i + 1).min(n_for_average) as f64;
        result.push((series[i].0, sum / denom));
    }
    Ok(result)
}
