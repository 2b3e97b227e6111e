//! First-class accessors used to lift a child machine into its parent.

/// Total accessor for a field that always exists.
pub struct Lens<W, P> {
    get: fn(&W) -> &P,
    set: fn(&mut W, P),
}

impl<W, P> Lens<W, P> {
    pub const fn new(get: fn(&W) -> &P, set: fn(&mut W, P)) -> Self {
        Self { get, set }
    }

    pub fn get<'a>(&self, whole: &'a W) -> &'a P {
        (self.get)(whole)
    }

    pub fn set(&self, mut whole: W, part: P) -> W {
        (self.set)(&mut whole, part);
        whole
    }
}

impl<W, P> Clone for Lens<W, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W, P> Copy for Lens<W, P> {}

/// Partial accessor for a field that may be absent, e.g. an `Option` child.
pub struct OptionalLens<W, P> {
    get: fn(&W) -> Option<&P>,
    set: fn(&mut W, P),
}

impl<W, P> OptionalLens<W, P> {
    pub const fn new(get: fn(&W) -> Option<&P>, set: fn(&mut W, P)) -> Self {
        Self { get, set }
    }

    pub fn get<'a>(&self, whole: &'a W) -> Option<&'a P> {
        (self.get)(whole)
    }

    pub fn set(&self, mut whole: W, part: P) -> W {
        (self.set)(&mut whole, part);
        whole
    }
}

impl<W, P> Clone for OptionalLens<W, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W, P> Copy for OptionalLens<W, P> {}

/// Accessor for one case of a sum type.
///
/// `extract` hands the whole value back on mismatch so nothing is cloned on
/// the miss path.
pub struct Prism<W, P> {
    extract: fn(W) -> Result<P, W>,
    embed: fn(P) -> W,
}

impl<W, P> Prism<W, P> {
    pub const fn new(extract: fn(W) -> Result<P, W>, embed: fn(P) -> W) -> Self {
        Self { extract, embed }
    }

    pub fn extract(&self, whole: W) -> Result<P, W> {
        (self.extract)(whole)
    }

    pub fn embed(&self, part: P) -> W {
        (self.embed)(part)
    }

    pub fn embedder(&self) -> fn(P) -> W {
        self.embed
    }
}

impl<W, P> Clone for Prism<W, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W, P> Copy for Prism<W, P> {}
