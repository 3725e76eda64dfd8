//! Pairwise Pearson correlation between numeric columns.

use serde::Serialize;

use crate::types::DataSet;

/// Square correlation matrix over the numeric columns, in declared order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// `values[i][j]` correlates `columns[i]` with `columns[j]`. NaN when undefined.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlation of two columns by name.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

/// Pearson correlation for every pair of numeric columns.
///
/// Each pair only uses rows where both cells are present. Fewer than two such rows, or a
/// constant column, gives NaN.
pub fn correlation_matrix(dataset: &DataSet) -> CorrelationMatrix {
    let numeric: Vec<(usize, String)> = dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .filter(|(_, f)| f.is_numeric())
        .map(|(idx, f)| (idx, f.name.clone()))
        .collect();

    let n = numeric.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(dataset, numeric[i].0, numeric[j].0);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        columns: numeric.into_iter().map(|(_, name)| name).collect(),
        values,
    }
}

fn pearson(dataset: &DataSet, a: usize, b: usize) -> f64 {
    let pairs: Vec<(f64, f64)> = dataset
        .rows
        .iter()
        .filter_map(|row| Some((row.get(a)?.as_f64()?, row.get(b)?.as_f64()?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let len = pairs.len() as f64;
    let mean_a = pairs.iter().map(|p| p.0).sum::<f64>() / len;
    let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / len;
    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        cov += (x - mean_a) * (y - mean_b);
        var_a += (x - mean_a).powi(2);
        var_b += (y - mean_b).powi(2);
    }
    if var_a == 0.0 || var_b == 0.0 {
        return f64::NAN;
    }
    cov / (var_a.sqrt() * var_b.sqrt())
}
