use serde::Serialize;

use crate::error::SerpError;

// The provider only answers in steps of ten
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PageSize(u8);

impl PageSize {
    pub const STEP: u8 = 10;
    pub const MIN: PageSize = PageSize(10);
    pub const MAX: PageSize = PageSize(100);

    pub fn new(size: u8) -> Result<Self, SerpError> {
        match size >= Self::MIN.0 && size <= Self::MAX.0 && size % Self::STEP == 0 {
            true => Ok(PageSize(size)),
            false => Err(SerpError::invalid_input(format!(
                "unsupported result count {}, expected a multiple of {} between {} and {}",
                size,
                Self::STEP,
                Self::MIN.0,
                Self::MAX.0
            ))),
        }
    }

    /// Smallest supported size that holds `count` results.
    pub fn covering(count: usize) -> Self {
        let count = count.clamp(Self::MIN.0 as usize, Self::MAX.0 as usize) as u8;
        PageSize(count.div_ceil(Self::STEP) * Self::STEP)
    }

    pub fn get(self) -> u8 {
        self.0
    }

        pub fn ladder(step: u8, max: PageSize) -> Result<Vec<PageSize>, SerpError> {
        if step == 0 || step % Self::STEP != 0 {
            return Err(SerpError::invalid_input(format!(
                "page step {} must be a positive multiple of {}",
                step,
                Self::STEP
            )));
        }

        let mut sizes: Vec<PageSize> = (1..)
            .map(|i: u16| i * step as u16)
            .take_while(|s| *s <= max.0 as u16)
            .map(|s| PageSize(s as u8))
            .collect();
        if sizes.last() != Some(&max) {
            sizes.push(max);
        }

        Ok(sizes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn parse(code: &str) -> Result<Self, SerpError> {
        // Accept the "id - Indonesian" labels too
        let code = code.split(" - ").next().unwrap_or_default().trim();

        match code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            true => Ok(LanguageCode(code.to_ascii_lowercase())),
            false => Err(SerpError::invalid_input(format!(
                "language code must be two letters, got {:?}",
                code
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub keyword: String,
    pub location: String,
    pub language: LanguageCode,
    pub num: PageSize,
    pub site: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SearchPayload<'a> {
    pub q: String,
    pub location: &'a str,
    pub gl: &'a str,
    pub hl: &'a str,
    pub num: u8,
}

impl SearchRequest {
    pub fn new(
        keyword: impl Into<String>,
        location: impl Into<String>,
        language: LanguageCode,
        num: PageSize,
    ) -> Result<Self, SerpError> {
        let keyword = keyword.into().trim().to_string();
        if keyword.is_empty() {
            return Err(SerpError::invalid_input("Please enter at least one keyword."));
        }

        Ok(SearchRequest {
            keyword,
            location: location.into(),
            language,
            num,
            site: None,
        })
    }

    pub fn with_site(mut self, site: Option<String>) -> Self {
        self.site = site
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    pub fn with_num(&self, num: PageSize) -> Self {
        SearchRequest {
            num,
            ..self.clone()
        }
    }

    pub fn query_text(&self) -> String {
        match &self.site {
            Some(site) => format!("{} site:{}", self.keyword, site),
            None => self.keyword.clone(),
        }
    }

    pub fn payload(&self) -> SearchPayload<'_> {
        SearchPayload {
            q: self.query_text(),
            location: &self.location,
            gl: self.language.as_str(),
            hl: self.language.as_str(),
            num: self.num.get(),
        }
    }
}

pub fn parse_keyword_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|kw| !kw.is_empty())
        .map(str::to_string)
        .collect()
}
