#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortProperty { #[default] Id, Title, Description, DueDate }

impl SortProperty {
    /// Property names as they appear in JSON and in `sort=` query values.
    pub fn from_json_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "description" => Some(Self::Description),
            "dueDate" => Some(Self::DueDate),
            _ => None,
        }
    }

    pub fn json_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Description => "description",
            Self::DueDate => "dueDate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction { #[default] Asc, Desc }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub property: SortProperty,
    pub direction: Direction,
}

impl Sort {
    /// Parses `property[,asc|desc]`. Unknown properties yield `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split(',').map(str::trim);
        let property = SortProperty::from_json_name(parts.next()?)?;
        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            Some("desc") => Direction::Desc,
            _ => Direction::Asc,
        };
        Some(Self { property, direction })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u32,
    pub size: u32,
    pub sort: Sort,
}

impl PageRequest {
    pub fn offset(&self) -> u64 { u64::from(self.number) * u64::from(self.size) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub request: PageRequest,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.request.size == 0 { return 0; }
        self.total_elements.div_ceil(u64::from(self.request.size))
    }

    pub fn has_next(&self) -> bool { u64::from(self.request.number) + 1 < self.total_pages() }

    pub fn has_previous(&self) -> bool { self.request.number > 0 }
}
