use serde::{Deserialize, Serialize};

use crate::error::{FlockError, FlockResult};
use crate::precision::{format_number, DecimalSeparator, RoundTo};

/// Øvre grense for antall fugler i ett veiesett.
pub const MAX_UNITS: usize = 300;

/// Standardstørrelse på et nytt veiesett.
pub const DEFAULT_UNITS: usize = 60;

/// Antall visningskolonner (indeks i hører til kolonne i % 3).
pub const DISPLAY_COLUMNS: usize = 3;

/// Én rute i veieskjemaet: tom eller en masse i kg.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "SlotIn", into = "Option<f64>")]
pub enum WeightSlot {
    #[default]
    Empty,
    Value(f64),
}

// Tolerant inngang: tall, tekst ("2,48" / "2.48" / "") eller null
#[derive(Deserialize)]
#[serde(untagged)]
enum SlotIn {
    Num(f64),
    Text(String),
    Null(()),
}

impl From<SlotIn> for WeightSlot {
    fn from(v: SlotIn) -> Self {
        match v {
            SlotIn::Num(x) => WeightSlot::from_value(x),
            SlotIn::Text(s) => WeightSlot::parse(&s),
            SlotIn::Null(()) => WeightSlot::Empty,
        }
    }
}

impl From<WeightSlot> for Option<f64> {
    fn from(slot: WeightSlot) -> Self {
        slot.value()
    }
}

impl WeightSlot {
    /// Tall → rute. Ikke-endelige verdier blir tomme; 0 og negative beholdes
    /// som verdi men regnes ikke som gyldige.
    pub fn from_value(x: f64) -> Self {
        if x.is_finite() {
            WeightSlot::Value(x)
        } else {
            WeightSlot::Empty
        }
    }

    /// Tekst fra skjema/import. Godtar komma som desimalskille.
    pub fn parse(text: &str) -> Self {
        let t = text.trim();
        if t.is_empty() {
            return WeightSlot::Empty;
        }
        match t.replace(',', ".").parse::<f64>() {
            Ok(x) if x.is_finite() && x > 0.0 => WeightSlot::Value(x),
            _ => WeightSlot::Empty,
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            WeightSlot::Value(x) => Some(x),
            WeightSlot::Empty => None,
        }
    }

    /// Gyldig prøve: endelig og > 0.
    pub fn valid(self) -> Option<f64> {
        self.value().filter(|x| x.is_finite() && *x > 0.0)
    }

    pub fn is_valid(self) -> bool {
        self.valid().is_some()
    }

    pub fn to_text(self, decimals: u32, separator: DecimalSeparator) -> String {
        match self {
            WeightSlot::Value(x) => format_number(x, decimals, separator),
            WeightSlot::Empty => String::new(),
        }
    }
}

/// Ordnet sett med `unit_count` ruter. Serialiseres som en flat liste.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WeightSlot>", into = "Vec<WeightSlot>")]
pub struct WeightSet {
    slots: Vec<WeightSlot>,
}

impl WeightSet {
    pub fn new(unit_count: usize) -> FlockResult<Self> {
        check_unit_count(unit_count)?;
        Ok(Self {
            slots: vec![WeightSlot::Empty; unit_count],
        })
    }

    /// Bygger et sett der hver verdi fyller én rute.
    pub fn from_values(values: &[f64]) -> FlockResult<Self> {
        check_unit_count(values.len())?;
        Ok(Self {
            slots: values.iter().map(|&x| WeightSlot::from_value(x)).collect(),
        })
    }

    pub fn from_slots(slots: Vec<WeightSlot>) -> FlockResult<Self> {
        check_unit_count(slots.len())?;
        Ok(Self { slots })
    }

    /// Importerer inntastet/innlimt tekst. Tall skilles med mellomrom eller `;`,
    /// rundes til 2 desimaler og fyller rutene forfra. Settet vokser hvis det
    /// kommer flere tall enn ruter.
    pub fn from_text(text: &str, unit_count: usize) -> FlockResult<Self> {
        check_unit_count(unit_count)?;
        let numbers: Vec<f64> = text
            .split(|c: char| c.is_whitespace() || c == ';')
            .filter_map(|tok| WeightSlot::parse(tok).valid())
            .map(|x| x.round_to(2))
            .collect();

        if numbers.is_empty() {
            return Err(FlockError::NoWeightsFound);
        }
        let len = numbers.len().max(unit_count);
        check_unit_count(len)?;

        let mut slots = vec![WeightSlot::Empty; len];
        for (slot, x) in slots.iter_mut().zip(numbers) {
            *slot = WeightSlot::Value(x);
        }
        Ok(Self { slots })
    }

    pub fn unit_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[WeightSlot] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<WeightSlot> {
        self.slots.get(index).copied()
    }

    pub fn set(&mut self, index: usize, slot: WeightSlot) -> FlockResult<()> {
        let len = self.slots.len();
        match self.slots.get_mut(index) {
            Some(s) => {
                *s = slot;
                Ok(())
            }
            None => Err(FlockError::IndexOutOfRange { index, len }),
        }
    }

    /// Tømmer alle ruter, beholder størrelsen.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = WeightSlot::Empty);
    }

    /// Ny størrelse; eksisterende verdier beholdes, overskudd kuttes.
    pub fn resize(&mut self, unit_count: usize) -> FlockResult<()> {
        check_unit_count(unit_count)?;
        self.slots.resize(unit_count, WeightSlot::Empty);
        Ok(())
    }

    /// Gyldige verdier i ruterekkefølge.
    pub fn valid_samples(&self) -> Vec<f64> {
        self.slots.iter().filter_map(|s| s.valid()).collect()
    }

    /// Posisjonene til de gyldige verdiene.
    pub fn valid_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_valid())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn valid_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_valid()).count()
    }

    pub fn total(&self) -> f64 {
        self.slots.iter().filter_map(|s| s.valid()).sum()
    }

    /// Sum per visningskolonne, brukes til kontrollsum i skjemaet.
    pub fn column_sums(&self) -> [f64; DISPLAY_COLUMNS] {
        let mut sums = [0.0; DISPLAY_COLUMNS];
        for (i, s) in self.slots.iter().enumerate() {
            if let Some(x) = s.valid() {
                sums[i % DISPLAY_COLUMNS] += x;
            }
        }
        sums
    }

    /// Skriver nye verdier inn i de gitte rutene (samme lengde forutsatt).
    pub(crate) fn write_values(&mut self, indices: &[usize], values: &[f64]) {
        for (&i, &x) in indices.iter().zip(values) {
            if let Some(s) = self.slots.get_mut(i) {
                *s = WeightSlot::Value(x);
            }
        }
    }
}

impl Default for WeightSet {
    fn default() -> Self {
        Self {
            slots: vec![WeightSlot::Empty; DEFAULT_UNITS],
        }
    }
}

impl TryFrom<Vec<WeightSlot>> for WeightSet {
    type Error = FlockError;

    fn try_from(slots: Vec<WeightSlot>) -> Result<Self, Self::Error> {
        WeightSet::from_slots(slots)
    }
}

impl From<WeightSet> for Vec<WeightSlot> {
    fn from(set: WeightSet) -> Self {
        set.slots
    }
}

fn check_unit_count(n: usize) -> FlockResult<()> {
    if (1..=MAX_UNITS).contains(&n) {
        Ok(())
    } else {
        Err(FlockError::InvalidUnitCount(n))
    }
}
