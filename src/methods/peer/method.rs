//! Catalog of explicit peer methods.
//!
//! Every entry stores the raw method data: nodes, the weight matrix `B`
//! (row sums are normalized when the coefficients are built), the order, the
//! maximal step ratio and the tuned blending parameter of the error model.

#![allow(clippy::excessive_precision)]

use std::{fmt, str::FromStr};

use crate::{Error, Float};

/// The explicit peer methods available in the catalog.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PeerMethod {
    EPP2,
    EPP4,
    EPP4y2,
    EPP4y3,
    EPP4_06809,
    EPP6p1,
    EPP6j1,
    EPP8_d,
    EPP8sp8,
    EPP_x1,
    EPP_x2,
}

impl PeerMethod {
    /// Every method of the catalog, by increasing stage count.
    pub const ALL: [PeerMethod; 11] = [
        PeerMethod::EPP2,
        PeerMethod::EPP4,
        PeerMethod::EPP4y2,
        PeerMethod::EPP4y3,
        PeerMethod::EPP4_06809,
        PeerMethod::EPP6p1,
        PeerMethod::EPP6j1,
        PeerMethod::EPP8_d,
        PeerMethod::EPP8sp8,
        PeerMethod::EPP_x1,
        PeerMethod::EPP_x2,
    ];

    pub fn name(self) -> &'static str {
        self.table().name
    }

    pub fn stages(self) -> usize {
        self.table().stages
    }

    pub fn order(self) -> usize {
        self.table().order
    }

    pub(crate) fn table(self) -> &'static MethodTable {
        match self {
            PeerMethod::EPP2 => &EPP2,
            PeerMethod::EPP4 => &EPP4,
            PeerMethod::EPP4y2 => &EPP4Y2,
            PeerMethod::EPP4y3 => &EPP4Y3,
            PeerMethod::EPP4_06809 => &EPP4_06809,
            PeerMethod::EPP6p1 => &EPP6P1,
            PeerMethod::EPP6j1 => &EPP6J1,
            PeerMethod::EPP8_d => &EPP8_D,
            PeerMethod::EPP8sp8 => &EPP8SP8,
            PeerMethod::EPP_x1 => &EPP_X1,
            PeerMethod::EPP_x2 => &EPP_X2,
        }
    }
}

impl fmt::Display for PeerMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PeerMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PeerMethod::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| Error::UnknownMethod(s.to_string()))
    }
}

/// Raw data of one catalog entry.
pub(crate) struct MethodTable {
    pub name: &'static str,
    pub stages: usize,
    pub order: usize,
    /// Largest ratio between consecutive step sizes.
    pub step_ratio_max: Float,
    /// Blending parameter `a` of the local error model.
    pub error_model_a: Float,
    pub nodes: &'static [Float],
    /// Rows of `B`, before row-sum normalization.
    pub weights: &'static [&'static [Float]],
}

const EPP2: MethodTable = MethodTable {
    name: "EPP2",
    stages: 2,
    order: 2,
    step_ratio_max: 1.5,
    error_model_a: 0.0,
    nodes: &[
        -1.0,
        1.0,
    ],
    weights: &[
        &[0.5, 0.5],
        &[0.5, 0.5],
    ],
};

const EPP4: MethodTable = MethodTable {
    name: "EPP4",
    stages: 4,
    order: 4,
    step_ratio_max: 1.4,
    error_model_a: 0.0,
    nodes: &[
        -1.0,
        -2.0 / 5.0,
        11.0 / 20.0,
        1.0,
    ],
    weights: &[
        &[-0.810068472, -0.437909571, 5.618482265, -3.370504222],
        &[0.008525097, -1.665642634, 5.799902598, -3.142785061],
        &[-0.476618420, 0.5422323993, 1.087151458, -0.1527654373],
        &[-1.468520018, 3.36438373, -3.284423359, 2.388559647],
    ],
};

const EPP4Y2: MethodTable = MethodTable {
    name: "EPP4y2",
    stages: 4,
    order: 4,
    step_ratio_max: 1.6,
    error_model_a: 0.0,
    nodes: &[
        0.44856672599000208,
        1.39573694851711427,
        1.862002092540212,
        1.0,
    ],
    weights: &[
        &[-0.00085592109218945, -0.00002375632236906, 0.00011240281897356, 1.00076727459558495],
        &[-0.18463151693356136, 0.0166248564168753, -0.08694965174179996, 1.25495631225848602],
        &[-0.01340990521951441, 0.00305657050832219, -0.01576893532468585, 1.02612227003587808],
        &[0.0, 0.0, 0.0, 1.0],
    ],
};

const EPP4Y3: MethodTable = MethodTable {
    name: "EPP4y3",
    stages: 4,
    order: 4,
    step_ratio_max: 1.6,
    error_model_a: 0.3125,
    nodes: &[
        1.33880820864483004,
        1.70380840062134099,
        1.86823097147835395,
        1.0,
    ],
    weights: &[
        &[0.00534248151938605, -0.12787556805087963, -0.01346305501819259, 1.13599614154968617],
        &[0.00291846709251725, -0.00273308699096256, -0.07182299833148626, 1.07163761822993158],
        &[0.00028874763346411, -0.00495214157424223, -0.00260939452842348, 1.00727278846920161],
        &[0.0, 0.0, 0.0, 1.0],
    ],
};

const EPP4_06809: MethodTable = MethodTable {
    name: "EPP4_06809",
    stages: 4,
    order: 4,
    step_ratio_max: 1.6,
    error_model_a: 0.0,
    nodes: &[
        -1.067193866512852,
        -2.756684444690223e-1,
        1.946690102724974,
        1.0,
    ],
    weights: &[
        &[-2.716560064574534e-1, 8.891878323750345e-1, -2.925373526104706e-1, 6.750055266928895e-1],
        &[1.349945068349794e-1, 2.852936122417532e-1, -2.183244224563100e-1, 7.980363033795774e-1],
        &[-1.316829664799590e-1, 1.684954092016832, 1.085405981287241, -1.638677106824114],
        &[2.358621659008970e-1, 5.306425158463548e-1, 3.325389053242893e-1, -9.904358707154119e-2],
    ],
};

const EPP6P1: MethodTable = MethodTable {
    name: "EPP6p1",
    stages: 6,
    order: 6,
    step_ratio_max: 1.5,
    error_model_a: 0.125,
    nodes: &[
        -1.31059599683912621,
        1.97665537290660046,
        1.6649784136534037,
        1.1586933567385133,
        0.5741070138915608,
        1.0,
    ],
    weights: &[
        &[0.13895408777711341, -0.08837957588373672, 0.32222771745172996, -0.33501322375446315, 0.10714669158143159, 0.8550643028279249],
        &[0.76848393019728558, -0.39601237423788838, 1.71331670705600939, -0.16709652789611371, 0.54842536517292088, -1.46711710029221376],
        &[0.17348417746015228, -0.07154407321571946, 0.29463725844330063, -0.08003079966892302, -0.21195447314566, 0.89540791012684957],
        &[0.00250303712641231, 0.00275619078550659, -0.02788674768628258, -0.06614667221305652, -0.12645307545127383, 1.21522726743869403],
        &[0.00063646601897938, -0.00344178637599682, 0.01015487188250037, -0.02819421169069512, 0.02856770023053085, 0.99227695993468134],
        &[0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
    ],
};

const EPP6J1: MethodTable = MethodTable {
    name: "EPP6j1",
    stages: 6,
    order: 6,
    step_ratio_max: 1.5,
    error_model_a: 0.125,
    nodes: &[
        6.1182488158460324e-1,
        1.0734784354567433,
        1.7733348046756701,
        1.9723174701317718,
        1.4155260278449762,
        1.0,
    ],
    weights: &[
        &[-2.0180146181687607e-4, 1.6304614802106130e-2, -1.2851544816318155e-2, 2.6210658256845634e-3, 3.7912816867901877e-3, 9.9033638396355417e-1],
        &[5.4402447198783130e-5, 2.4618095745274586e-4, 4.1283950478615055e-3, 1.0819600004066808e-3, -6.4960842108610951e-3, 1.0009851457579413],
        &[-1.3283089416477777e-4, 2.6585250025434079e-4, -3.9985754350926959e-4, -1.4512932179574525e-2, 1.0221144035648493e-2, 1.0045586240813458],
        &[1.9579814800354238e-4, -1.4979121212198304e-4, 1.4147303648950299e-4, -1.8142965943514442e-4, -1.7806845742653309e-2, 1.0178007954297175],
        &[-7.6319822223659301e-6, 1.8177963233112666e-4, -1.7553812394822423e-4, -4.0614157234655195e-5, 5.3690770730854430e-4, 9.9950509692376555e-1],
        &[0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
    ],
};

const EPP8_D: MethodTable = MethodTable {
    name: "EPP8_d",
    stages: 8,
    order: 8,
    step_ratio_max: 1.4,
    error_model_a: 0.0,
    nodes: &[
        0.26041740957753135,
        0.52923626823623069,
        1.54653689839871537,
        1.77514379674033294,
        0.090107569010498,
        0.19995116126552217,
        1.32615523512850911,
        1.0,
    ],
    weights: &[
        &[0.00218540643609441, 0.00964151773849017, 0.02740905027639759, -0.00757481375423608, -0.00627931764830473, -0.00651613228833201, -0.00103882981570947, 0.98217311905560012],
        &[0.0026911855247508, -0.00999004293842317, 0.01299877362586784, -0.00362117297559769, -0.01393348294082885, 0.00206411701387576, -0.00794032918151776, 1.01773095187187307],
        &[0.00199608410884834, -0.01002762418952864, 0.02034106943279384, -0.00932460631409766, -0.00937443352246159, 0.00649579387949097, -0.02592014846435581, 1.02581386506931055],
        &[0.00103036221311367, -0.01190896158535306, 0.02063699940945861, -0.00672959115904196, -0.00583850891833535, 0.03351758481419382, -0.03846471330760932, 1.0077568285335736],
        &[0.00148756342489522, -0.01047547599327585, 0.0208838878315454, -0.00663219960933854, -0.00563964345840616, 0.02716167598460901, -0.00664272798306554, 0.97985691980303647],
        &[0.00205269876381091, -0.00960860565429818, 0.0205427263285296, -0.00625381166734364, -0.00577560681234781, 0.01293837851580094, 0.00660793064341287, 0.97949628988243531],
        &[0.00184988219096286, -0.01079724930569055, 0.02051636130170474, -0.00632847064898024, -0.00550013664675566, 0.01390490619566548, -0.01323688831455224, 0.99959159522764561],
        &[0.00186731024859287, -0.01061165690522434, 0.02042910717986102, -0.00630049368165016, -0.00568571957918147, 0.01348102696866063, -0.01331088571679290, 1.00013131148573434],
    ],
};

const EPP8SP8: MethodTable = MethodTable {
    name: "EPP8sp8",
    stages: 8,
    order: 8,
    step_ratio_max: 1.4,
    error_model_a: 0.0,
    nodes: &[
        0.70541387781778147,
        1.30641486071640562,
        0.31760983680370311,
        1.34289163028271588,
        0.26801849628336664,
        1.06975280780012286,
        1.20363542351617524,
        1.0,
    ],
    weights: &[
        &[0.27218496097888581, 0.24481602761226617, 0.14324265273812842, 0.07518091759856021, 0.10880381601605394, -0.08559047504042014, -0.89848704629310313, 1.1398491463896287],
        &[0.27218494251985784, 0.24475826229310614, 0.14312713840849838, 0.07511662694065275, 0.10880496489216468, -0.08573012564915534, -0.89863712500172939, 1.14037531559660494],
        &[0.27218494691659497, 0.24475827494648921, 0.14324960884617646, 0.07514374234973973, 0.10870161200141529, -0.08562615141184479, -0.89856217679317559, 1.14015014314460471],
        &[0.2721849293851366, 0.24475827854943941, 0.1432496044378971, 0.07516501652473434, 0.1086230286174295, -0.08576394151117088, -0.89869867862268446, 1.1404817626192184],
        &[0.27218493682276326, 0.2447582729025796, 0.14324957805862669, 0.07516500809749052, 0.10873535122317697, -0.08577918038240442, -0.89851969781206312, 1.1402057310898305],
        &[0.27218494476634404, 0.24475826960211763, 0.14324957747511375, 0.07516500706866706, 0.10873538294098683, -0.08567964439138113, -0.89843186740710734, 1.14001832994525916],
        &[0.27218494660576334, 0.2447582805123369, 0.14324957501518646, 0.0751650064576131, 0.10873538290916957, -0.08567965711914102, -0.89853485595644752, 1.14012132157551916],
        &[0.27218494660493086, 0.24475827948013657, 0.14324958032207845, 0.07516500887490214, 0.10873538145127106, -0.08567966433201819, -0.89853483288304983, 1.14012130048174894],
    ],
};

const EPP_X1: MethodTable = MethodTable {
    name: "EPP_x1",
    stages: 8,
    order: 8,
    step_ratio_max: 1.4,
    error_model_a: 0.0,
    nodes: &[
        -1.020253410235809,
        -7.973369854084624e-1,
        -5.523527869930042e-1,
        -1.601795297055826e-1,
        2.567353840060831e-1,
        5.758479688560444e-1,
        8.048768575883170e-1,
        1.0,
    ],
    weights: &[
        &[2.625189510221092e-5, -1.898215388937858e-5, 1.817009753212212e-3, 9.967928831100421e-1, 1.741824921921685e-4, 2.174441508324741e-3, -1.677221467830472e-4, -7.980644582009861e-4],
        &[8.100101125281656e-4, 1.002801199171737e-3, -1.118614707367094e-4, 9.970279280278038e-1, -1.983509579940047e-3, 7.804032379917670e-4, 7.881153868976325e-4, 1.686113086283548e-3],
        &[-9.879713512756130e-4, 8.020695098409326e-5, 1.666760283706175e-3, 9.953316156454997e-1, 2.508073453472758e-4, -3.654635962011422e-4, 1.959602069475001e-3, 2.064442652464573e-3],
        &[-8.835912374043340e-4, -1.760815796251268e-3, 2.331454645143357e-3, 9.981121059461671e-1, 2.273217656663430e-3, -6.558878934506733e-5, 1.101322224606321e-4, -1.169146474339194e-4],
        &[2.214901854024395e-3, -4.929384902160960e-4, 1.412225706887807e-3, 9.961893228068536e-1, -1.921087072457036e-4, -2.164510616598476e-3, 1.669222622278326e-3, 1.363884824016043e-3],
        &[1.576721961555554e-3, 1.317624066616264e-4, 1.386449758969554e-3, 9.934659543403941e-1, 1.424864416795372e-3, 9.666678111011650e-4, -1.288319653300130e-3, 2.335898957822821e-3],
        &[-1.429351554370223e-3, -2.054822802735597e-4, 5.036279143570400e-4, 1.001130852115276, -7.867597108633510e-4, 1.592378375989060e-3, 2.548549580728228e-4, -1.060119818187650e-3],
        &[6.277247319384195e-4, 4.892457115011240e-4, -1.541906260922679e-3, 1.001178331446194, 1.541403411299333e-3, -1.715851337805785e-3, -1.947535937192549e-3, 1.368588234988504e-3],
    ],
};

const EPP_X2: MethodTable = MethodTable {
    name: "EPP_x2",
    stages: 8,
    order: 8,
    step_ratio_max: 1.4,
    error_model_a: 1.0,
    nodes: &[
        -1.514542417302030,
        -1.003995798476134,
        -5.372648489667148e-1,
        -6.969892603966277e-2,
        2.867223168569619e-1,
        7.943872874460213e-1,
        1.516388473646935,
        1.0,
    ],
    weights: &[
        &[-2.806877716477130e-2, 1.135981190423357e-2, -2.110383374673507e-2, 1.037885271481855, -2.490268975167300e-2, 7.668414990349029e-3, 1.814611059875396e-2, -9.843083120119264e-4],
        &[3.833268630087496e-3, -2.144635474502071e-2, -3.268424349441350e-2, 1.061028463256470, -1.543617522327160e-2, 2.390602005607571e-2, -4.431530991242315e-3, -1.476944748868486e-2],
        &[1.517768428061389e-2, -4.118587370592280e-3, -3.428305617434239e-3, 9.841348202355257e-1, -2.899959231656522e-2, 3.010638273007045e-2, 2.187082102577848e-2, -1.474322296739694e-2],
        &[2.774930716975024e-2, 3.233760768362689e-2, 1.578243438357346e-2, 8.980551794364540e-1, 1.081300247363562e-3, 1.959734287518365e-2, -1.255493065641702e-3, 6.652321269689837e-3],
        &[6.882004136347424e-3, -2.207359291833351e-2, 1.806414842816704e-2, 9.890131245336967e-1, 5.357020858953068e-3, -9.626265478966035e-3, -1.809330236593781e-2, 3.047686280607328e-2],
        &[-1.803090133918039e-2, -4.588805985737581e-2, -2.519561283870134e-2, 1.075261749109603, 2.031592200888563e-2, -3.455936510468920e-2, 6.132333433229704e-3, 2.196393458822805e-2],
        &[4.751715502768429e-3, -1.080836510327213e-2, 4.242786141675581e-3, 9.614609736912729e-1, 2.758883811192216e-2, 7.255102679141721e-3, -9.507573358168125e-3, 1.501652233465931e-2],
        &[1.700680076802063e-2, 8.759888270257397e-3, -1.497101816869549e-2, 9.355634245613111e-1, 1.410966089361167e-2, 2.494725465581370e-2, 1.866148320743530e-2, -4.077494187754325e-3],
    ],
};
