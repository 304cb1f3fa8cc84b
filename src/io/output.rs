//! To describe dump of distance matrices


/// only Csv now.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    CSV,
}

#[derive(Clone, Debug)]
pub struct Output {
    /// describe output format
    fmt: Format,
    /// name of output file
    output_name: String,
}

impl Output {
    /// if output_name is None, default output_name will be "distances.csv".
    /// The suffix .csv is added if not present
    pub fn new(fmt: Format, output_name: &Option<String>) -> Self {
        let output_name = match output_name {
            Some(name) => {
                let mut csv_name = name.clone();
                if !csv_name.ends_with(".csv") {
                    csv_name.push_str(".csv");
                }
                csv_name
            }
            None => String::from("distances.csv"),
        };
        Output { fmt, output_name }
    }
    /// get ouput format
    pub fn get_fmt(&self) -> Format {
        self.fmt
    }

    /// get output_name
    pub fn get_output_name(&self) -> &String {
        &self.output_name
    }
} // end of Output


impl Default for Output {
    fn default() -> Self {
        Output { fmt: Format::CSV, output_name: String::from("distances.csv") }
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_output_name() {
        assert_eq!(Output::default().get_output_name(), "distances.csv");
        assert_eq!(Output::new(Format::CSV, &Some("mutag".into())).get_output_name(), "mutag.csv");
        assert_eq!(Output::new(Format::CSV, &Some("mutag.csv".into())).get_output_name(), "mutag.csv");
        assert_eq!(Output::new(Format::CSV, &None).get_fmt(), Format::CSV);
    }
} // end of mod tests
